use crate::bridge::tool_definition;
use crate::cli::SchemaArgs;
use crate::config::Config;
use schemars::schema_for;

pub fn execute(args: SchemaArgs) -> anyhow::Result<()> {
    let json = if args.config_schema {
        serde_json::to_string_pretty(&schema_for!(Config))?
    } else {
        serde_json::to_string_pretty(&tool_definition())?
    };
    println!("{}", json);
    Ok(())
}
