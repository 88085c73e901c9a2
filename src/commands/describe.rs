//! Implementation of `atmos describe config|stack`.

use crate::cli::{FormatArgs, GlobalArgs, OutputFormat};
use crate::error::{AtmosError, Result};
use crate::stacks::{FileStackProcessor, StackProcessor};

/// Print the finalized CLI config.
pub fn cmd_describe_config(global: &GlobalArgs, args: FormatArgs) -> Result<()> {
    let config = super::load_config(global, false)?;

    let rendered = match args.format {
        OutputFormat::Yaml => config.to_yaml()?,
        OutputFormat::Json => config.to_json()? + "\n",
    };
    print!("{}", rendered);
    Ok(())
}

/// Print the stack selected with `--stack`, merged across its files.
pub fn cmd_describe_stack(global: &GlobalArgs, args: FormatArgs) -> Result<()> {
    if global.stack().is_none() {
        return Err(AtmosError::UserError(
            "'--stack' ('-s') is required. Usage: atmos describe stack -s <stack>".to_string(),
        ));
    }

    let config = super::load_config(global, true)?;
    let stack = FileStackProcessor.describe_stack(&config)?;

    let rendered = match args.format {
        OutputFormat::Yaml => serde_yaml::to_string(&stack).map_err(|e| {
            AtmosError::UserError(format!("failed to render stack as YAML: {}", e))
        })?,
        OutputFormat::Json => serde_json::to_string_pretty(&stack)
            .map(|json| json + "\n")
            .map_err(|e| AtmosError::UserError(format!("failed to render stack as JSON: {}", e)))?,
    };
    print!("{}", rendered);
    Ok(())
}
