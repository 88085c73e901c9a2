//! Implementation of `atmos terraform|helmfile generate varfile`.

use crate::cli::{GlobalArgs, VarfileArgs};
use crate::config::ComponentType;
use crate::error::{AtmosError, Result};
use crate::stacks::{FileStackProcessor, StackProcessor};
use crate::varfile::{varfile_path, write_varfile};

/// Execute `generate varfile` for `component_type`.
pub fn cmd_generate_varfile(
    global: &GlobalArgs,
    component_type: ComponentType,
    args: VarfileArgs,
) -> Result<()> {
    let stack = global.stack().ok_or_else(|| {
        AtmosError::UserError(format!(
            "'--stack' ('-s') is required. Usage: atmos {} generate varfile <component> -s <stack>",
            component_type
        ))
    })?;

    let config = super::load_config(global, true)?;

    let vars = FileStackProcessor.component_vars(&config, component_type, &args.component, stack)?;
    let path = varfile_path(
        &config,
        component_type,
        &args.component,
        stack,
        args.file.as_deref(),
    )?;

    println!(
        "\nVariables for the component '{}' in the stack '{}':\n",
        args.component, stack
    );
    print!("{}", render_yaml(&vars)?);

    println!("Writing the variables to file:");
    println!("{}", path.display());
    write_varfile(&path, component_type, &vars, global.dry_run)?;

    println!();
    Ok(())
}

fn render_yaml(value: &serde_yaml::Value) -> Result<String> {
    serde_yaml::to_string(value)
        .map_err(|e| AtmosError::UserError(format!("failed to render variables as YAML: {}", e)))
}
