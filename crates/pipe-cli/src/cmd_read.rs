/// Implementation of `pipe read`.
///
/// Loads a file into a [`Pipe`] and runs a read script against it, one
/// operation after another. Each record shows the offset the operation
/// started at, the operation, and the decoded value.
///
/// # Output format
///
/// ```text
/// 000000  dword         305419896 (0x12345678)
/// 000004  packed-word   300 (0x12C)
/// 000006  rest          [2 bytes] beef
/// ---
/// end offset 8, 0 bytes remaining
/// ```
///
/// With `--format json` a single [`Report`] document is printed instead.
///
/// A failing operation aborts the run. In text mode the records read so far
/// have already been printed; in JSON mode nothing is printed.
use std::fs;

use anyhow::{Context, Result};
use pipe_wire::Pipe;
use tracing::{debug, info};

use crate::ReadArgs;
use crate::output::{OutputFormat, Record, Report};
use crate::script::Script;

/// Run the `pipe read` command.
///
/// # Errors
///
/// Returns an error if the file or script cannot be read, the script does
/// not parse, or an operation runs past the end of the file.
pub fn run(args: &ReadArgs) -> Result<()> {
    let script = load_script(args)?;
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;
    info!(
        file = %args.file.display(),
        len = bytes.len(),
        ops = script.ops.len(),
        "running read script"
    );

    let mut pipe = Pipe::new(bytes);
    let text = args.format == OutputFormat::Text;
    let mut records = Vec::with_capacity(script.ops.len());

    for (idx, &op) in script.ops.iter().enumerate() {
        let offset = pipe.offset();
        let value = op
            .apply(&mut pipe)
            .with_context(|| format!("operation {idx} (`{op}`) failed"))?;
        let record = Record::new(offset, op, &value);
        if text {
            println!("{}", record.to_text());
        }
        records.push(record);
    }

    debug!(end_offset = pipe.offset(), remaining = pipe.remaining(), "script finished");

    match args.format {
        OutputFormat::Text => {
            println!("---");
            println!(
                "end offset {}, {} bytes remaining",
                pipe.offset(),
                pipe.remaining()
            );
        }
        OutputFormat::Json => {
            let report = Report {
                records,
                end_offset: pipe.offset(),
                remaining: pipe.remaining(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn load_script(args: &ReadArgs) -> Result<Script> {
    if let Some(path) = &args.script {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read script {}", path.display()))?;
        return Script::from_lines(&text)
            .with_context(|| format!("invalid script {}", path.display()));
    }
    let list = args.ops.as_deref().unwrap_or_default();
    Script::from_list(list).context("invalid --ops list")
}
