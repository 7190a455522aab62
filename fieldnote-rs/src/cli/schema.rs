//! Schema command implementation.

use crate::cli::args::SchemaArgs;
use crate::cli::output::Output;
use crate::error::Result;
use crate::schema;

pub fn run(args: &SchemaArgs, output: &Output) -> Result<()> {
    match schema::resolve(&args.path)? {
        Some(schema) => output.print(&schema),
        None => {
            output.info("no schema declaration found");
            output.print(&serde_json::Value::Null)
        }
    }
}
