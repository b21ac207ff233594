use crate::core::disambiguator::disambiguate;
use crate::core::report::{column_samples, row_preview};
use crate::core::resolver::FieldResolver;
use crate::core::{
    ColumnSample, ConfigProvider, ConversionResult, ExtractedData, LoadedFiles, Pipeline,
    SourceRecord, Storage, TargetRecord,
};
use crate::utils::error::{ConvertError, Result};

const DEBUG_ROWS: usize = 3;
const DEBUG_VALUE_CHARS: usize = 30;

pub struct ConvertPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ConvertPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn dump_rows(&self, records: &[SourceRecord]) {
        for (i, record) in records.iter().take(DEBUG_ROWS).enumerate() {
            tracing::debug!("🔍 Row {} raw data:", i + 1);
            for (header, value) in row_preview(record, DEBUG_VALUE_CHARS, self.config.candidates())
            {
                tracing::debug!("   {}: {}", header, value);
            }
        }
    }
}

/// Serializes records under the fixed import header. The header is written
/// even when there are no records.
pub fn render_csv(records: &[TargetRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(TargetRecord::HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| ConvertError::IoError(e.into_error()))
}

impl<S: Storage, C: ConfigProvider> Pipeline for ConvertPipeline<S, C> {
    fn extract(&self) -> Result<ExtractedData> {
        let input = self.config.input_path();
        tracing::info!("📋 Analyzing {}", input);
        let bytes = self.storage.read_file(input)?;

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(bytes.as_slice());
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut records = Vec::new();
        for (i, row) in reader.records().enumerate() {
            let row = row?;
            if row.len() > headers.len() {
                tracing::warn!(
                    "⚠️  Row {}: {} extra cells beyond the header ignored",
                    i + 1,
                    row.len() - headers.len()
                );
            }

            let fields = headers
                .iter()
                .enumerate()
                .map(|(col, header)| (header.clone(), row.get(col).unwrap_or("").to_string()))
                .collect();
            records.push(SourceRecord::new(fields));
        }

        tracing::debug!("Parsed {} columns and {} rows", headers.len(), records.len());
        Ok(ExtractedData { headers, records })
    }

    fn analyze(&self, data: &ExtractedData) -> Vec<ColumnSample> {
        column_samples(data.records.first(), self.config.candidates())
    }

    fn transform(&self, data: ExtractedData) -> Result<ConversionResult> {
        if self.config.debug() {
            self.dump_rows(&data.records);
        }

        let resolver = FieldResolver::new(self.config.candidates().clone());
        let batch = resolver.resolve_all(&data.records);
        let resolved = disambiguate(batch.records);

        tracing::debug!(
            "Resolved {} records, {} duplicates",
            resolved.records.len(),
            resolved.duplicates.len()
        );

        Ok(ConversionResult {
            records: resolved.records,
            duplicates: resolved.duplicates,
            missing_usernames: batch.missing_usernames,
            url_counts: resolved.url_counts,
        })
    }

    fn load(&self, result: &ConversionResult) -> Result<LoadedFiles> {
        let names = self.config.output_files();

        let primary_data = render_csv(&result.records)?;
        tracing::debug!("Writing {} ({} bytes)", names.primary, primary_data.len());
        let primary = self.storage.write_file(&names.primary, &primary_data)?;

        let duplicates = if result.duplicates.is_empty() {
            None
        } else {
            let data = render_csv(&result.duplicates)?;
            tracing::debug!("Writing {} ({} bytes)", names.duplicates, data.len());
            Some(self.storage.write_file(&names.duplicates, &data)?)
        };

        Ok(LoadedFiles {
            primary,
            duplicates,
        })
    }
}
