use crate::types::TaggingRecord;
use eyre::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(eyre::eyre!("unknown output format {:?} (expected json or csv)", other)),
        }
    }
}

/// Column layout expected by the registry's CSV import.
#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Contract Address")]
    contract_address: &'a str,
    #[serde(rename = "Public Name Tag")]
    public_name_tag: &'a str,
    #[serde(rename = "Project Name")]
    project_name: &'a str,
    #[serde(rename = "UI/Website Link")]
    website_link: &'a str,
    #[serde(rename = "Public Note")]
    public_note: &'a str,
}

impl<'a> From<&'a TaggingRecord> for CsvRow<'a> {
    fn from(tag: &'a TaggingRecord) -> Self {
        Self {
            contract_address: &tag.contract_address,
            public_name_tag: &tag.public_name_tag,
            project_name: &tag.project_name,
            website_link: &tag.website_link,
            public_note: &tag.public_note,
        }
    }
}

pub fn write_json<W: Write>(writer: W, tags: &[TaggingRecord]) -> Result<()> {
    serde_json::to_writer_pretty(writer, tags)?;
    Ok(())
}

pub fn write_csv<W: Write>(writer: W, tags: &[TaggingRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for tag in tags {
        writer.serialize(CsvRow::from(tag))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_tags<W: Write>(writer: W, format: OutputFormat, tags: &[TaggingRecord]) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(writer, tags),
        OutputFormat::Csv => write_csv(writer, tags),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag() -> TaggingRecord {
        TaggingRecord {
            contract_address: "eip155:1:0xA".to_string(),
            public_name_tag: "USDC/sUSDC/vUSDC Market".to_string(),
            project_name: "Example Lend".to_string(),
            website_link: "https://example.com".to_string(),
            public_note: "The Example Lend lending market for USD Coin (USDC), with stable debt token A (sUSDC) and variable debt token B (vUSDC).".to_string(),
        }
    }

    #[test]
    fn test_csv_has_registry_headers() {
        let mut out = Vec::new();
        write_csv(&mut out, &[tag()]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Contract Address,Public Name Tag,Project Name,UI/Website Link,Public Note"
        );
        assert!(lines.next().unwrap().starts_with("eip155:1:0xA,USDC/sUSDC/vUSDC Market,"));
    }

    #[test]
    fn test_json_uses_camel_case_fields() {
        let mut out = Vec::new();
        write_json(&mut out, &[tag()]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["contractAddress"], "eip155:1:0xA");
        assert_eq!(value[0]["websiteLink"], "https://example.com");
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
