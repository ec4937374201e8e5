//! CLI tool for xltable - renders a JSON workbook into a standalone HTML page
//!
//! Usage:
//!   xltable_cli <workbook.json>                       # Page to stdout
//!   xltable_cli <workbook.json> -o out.html           # Page to file
//!   xltable_cli <workbook.json> --sheet 2 --all       # Start on sheet 2, build every sheet
//!   xltable_cli <workbook.json> --chunk-size 100

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

use xltable::logging;
use xltable::{
    HtmlDocument, Immediate, JsonDecoder, LoadOutcome, NoopListener, Viewer, ViewerOptions,
    WorkbookSource,
};

const USAGE: &str =
    "Usage: xltable_cli <workbook.json> [-o output.html] [--sheet N] [--chunk-size N] [--all]";

struct Args {
    input: PathBuf,
    output: Option<PathBuf>,
    options: ViewerOptions,
    all: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut input = None;
    let mut output = None;
    let mut options = ViewerOptions::default();
    let mut all = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" | "--output" => output = Some(args.next().ok_or("-o needs a path")?.into()),
            "--sheet" => {
                let value = args.next().ok_or("--sheet needs an index")?;
                options.initial_sheet_index = value
                    .parse()
                    .map_err(|_| format!("invalid sheet index `{value}`"))?;
            }
            "--chunk-size" => {
                let value = args.next().ok_or("--chunk-size needs a number")?;
                options.chunk_size = value
                    .parse()
                    .map_err(|_| format!("invalid chunk size `{value}`"))?;
            }
            "--all" => all = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            other if input.is_none() => input = Some(PathBuf::from(other)),
            other => return Err(format!("unexpected argument `{other}`\n{USAGE}")),
        }
    }

    Ok(Args {
        input: input.ok_or(USAGE)?,
        output,
        options,
        all,
    })
}

async fn render(args: &Args) -> xltable::error::Result<(String, LoadOutcome)> {
    let mut viewer = Viewer::new(
        HtmlDocument::new(),
        Rc::new(Immediate),
        Rc::new(NoopListener),
        args.options,
    )?;
    let outcome = viewer
        .open(WorkbookSource::File(args.input.clone()), &JsonDecoder)
        .await?;

    if args.all && matches!(outcome, LoadOutcome::Loaded { .. }) {
        for index in 0..viewer.tabs().len() {
            if let Some(build) = viewer.prebuild(index) {
                build.run(&Immediate, &NoopListener).await?;
            }
        }
    }

    let title = args
        .input
        .file_stem()
        .map_or_else(|| "workbook".to_string(), |s| s.to_string_lossy().into_owned());
    Ok((viewer.surface().to_page(&title), outcome))
}

fn main() {
    logging::init(log::LevelFilter::Warn);

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("failed to start runtime");
    let (page, outcome) = match runtime.block_on(render(&args)) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error rendering {}: {}", args.input.display(), e);
            std::process::exit(1);
        }
    };
    if let LoadOutcome::Failed(message) = &outcome {
        eprintln!("Error loading {}: {}", args.input.display(), message);
    }

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &page) {
                eprintln!("Error writing {}: {}", path.display(), e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path.display());
        }
        None => {
            io::stdout().write_all(page.as_bytes()).unwrap();
        }
    }

    if matches!(outcome, LoadOutcome::Failed(_)) {
        std::process::exit(2);
    }
}
