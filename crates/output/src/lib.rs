use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

pub struct OutputRenderer {
    format: OutputFormat,
}

impl OutputRenderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn render<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", self.render_to_string(value)?);
        Ok(())
    }

    pub fn render_to_string<T: Serialize>(&self, value: &T) -> Result<String> {
        let json_value = serde_json::to_value(value)?;

        let rendered = match self.format {
            OutputFormat::Table => match Self::table(&json_value) {
                Some(table) => table,
                None => match &json_value {
                    Value::String(s) => s.clone(),
                    other => serde_json::to_string_pretty(other)?,
                },
            },
            OutputFormat::Json => serde_json::to_string_pretty(&json_value)?,
            OutputFormat::Yaml => serde_yaml::to_string(&json_value)?
                .trim_end()
                .to_string(),
        };

        Ok(rendered)
    }

    /// Non-empty objects become a two-column field/value table. Anything
    /// else has no table form.
    fn table(value: &Value) -> Option<String> {
        let obj = match value {
            Value::Object(obj) if !obj.is_empty() => obj,
            _ => return None,
        };

        let mut builder = Builder::default();
        builder.push_record(["field".to_string(), "value".to_string()]);
        for (field, val) in obj {
            builder.push_record([field.clone(), Self::value_to_string(val)]);
        }

        Some(builder.build().with(Style::rounded()).to_string())
    }

    fn value_to_string(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
            other => serde_json::to_string(other).unwrap_or_default(),
        }
    }
}
