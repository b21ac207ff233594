use crate::core::report::ConversionReport;
use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ConvertEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ConvertEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<ConversionReport> {
        // Extract
        let extracted = self.pipeline.extract()?;
        tracing::info!("Extracted {} records", extracted.records.len());
        let columns = self.pipeline.analyze(&extracted);

        // Transform
        let result = self.pipeline.transform(extracted)?;
        tracing::info!(
            "Transformed {} records ({} duplicate URLs)",
            result.records.len(),
            result.duplicates.len()
        );

        // Load
        let files = self.pipeline.load(&result)?;
        tracing::info!("Output saved to: {}", files.primary.display());

        Ok(ConversionReport::new(columns, &result, files))
    }
}
