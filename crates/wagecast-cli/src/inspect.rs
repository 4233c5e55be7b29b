//! `wagecast inspect`: per-sector load status, schema, and optional sample run.

use std::io::Write;

use anyhow::Context;
use wagecast_core::{Sector, SectorSchema, SectorStatus};
use wagecast_predict::PredictionService;

const MAX_CLASSES: usize = 12;

pub fn run(service: &PredictionService, sample: bool) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for sector in Sector::ALL {
        write_sector(&mut out, service, sector, sample)?;
    }
    out.flush().context("flushing stdout")
}

fn write_sector(
    out: &mut impl Write,
    service: &PredictionService,
    sector: Sector,
    sample: bool,
) -> anyhow::Result<()> {
    match service.registry().status(sector) {
        Some(SectorStatus::Loaded(loaded)) => {
            writeln!(out, "{} [loaded]", sector.display_name())?;
            write_schema(out, &loaded.schema)?;
            if sample {
                write_sample(out, service, sector)?;
            }
        }
        Some(SectorStatus::Unavailable { reason }) => {
            writeln!(out, "{} [unavailable] {reason}", sector.display_name())?;
        }
        None => writeln!(out, "{} [unknown]", sector.display_name())?,
    }
    writeln!(out)?;
    Ok(())
}

fn write_schema(out: &mut impl Write, schema: &SectorSchema) -> anyhow::Result<()> {
    writeln!(out, "  features ({}):", schema.feature_count())?;
    for (i, name) in schema.feature_order().iter().enumerate() {
        match schema.vocabulary(name) {
            Some(vocab) => {
                let shown: Vec<&str> = vocab
                    .classes()
                    .iter()
                    .take(MAX_CLASSES)
                    .map(String::as_str)
                    .collect();
                let more = vocab.len().saturating_sub(MAX_CLASSES);
                let suffix = if more > 0 { format!(" … +{more}") } else { String::new() };
                writeln!(out, "    {i:>2}. {name:<20} categorical: {}{suffix}", shown.join(", "))?;
            }
            None => writeln!(out, "    {i:>2}. {name:<20} numeric")?,
        }
    }
    if !schema.metadata().is_empty() {
        let meta = serde_json::to_string(schema.metadata()).context("rendering metadata")?;
        writeln!(out, "  metadata: {meta}")?;
    }
    Ok(())
}

fn write_sample(
    out: &mut impl Write,
    service: &PredictionService,
    sector: Sector,
) -> anyhow::Result<()> {
    match service.predict(sector.as_str(), &sector.sample_input()) {
        Ok(result) => writeln!(
            out,
            "  sample: daily {:.2}, monthly {:.2}, annual {:.2}",
            result.predicted_wage, result.monthly_estimate, result.annual_estimate
        )?,
        Err(e) => writeln!(out, "  sample failed: {e}")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use wagecast_core::{LoadedSector, SectorRegistry};

    use super::*;

    fn service() -> PredictionService {
        let schema = SectorSchema::from_classes(
            [
                "age",
                "experience_years",
                "education_level",
                "occupation",
                "skill_level",
                "state",
                "working_hours",
                "employment_type",
            ]
            .map(String::from)
            .to_vec(),
            [
                ("state".to_string(), vec!["MH".to_string()]),
                ("occupation".to_string(), vec!["tractor operator".to_string()]),
                ("education_level".to_string(), vec!["secondary".to_string()]),
                ("employment_type".to_string(), vec!["permanent".to_string()]),
            ],
            serde_json::Map::new(),
        )
        .unwrap();
        let predictor = |_: &[f64]| -> anyhow::Result<f64> { Ok(400.0) };
        let registry = SectorRegistry::from_outcomes([
            (
                Sector::Agriculture,
                Ok(LoadedSector::new(schema, Arc::new(predictor))),
            ),
            (Sector::Construction, Err("model directory not found: x".to_string())),
        ]);
        PredictionService::new(Arc::new(registry))
    }

    #[test]
    fn reports_loaded_and_unavailable_sectors() {
        let service = service();
        let mut buf = Vec::new();
        for sector in Sector::ALL {
            write_sector(&mut buf, &service, sector, true).unwrap();
        }
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Agriculture [loaded]"));
        assert!(text.contains("state"));
        assert!(text.contains("sample: daily 400.00, monthly 10400.00, annual 124800.00"));
        assert!(text.contains("Construction [unavailable] model directory not found: x"));
    }
}
