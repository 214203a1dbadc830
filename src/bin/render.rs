//! Schema Render CLI
//!
//! Debugging driver for the JSON Schema renderer: reads parsed AST files
//! (JSON, as emitted by the typedown parser) and writes one
//! `.schema.json` artifact per input. The production pipeline drives the
//! renderer through its library API; this binary exists for inspecting
//! renderer output in isolation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use typedown_jsonschema::ast::SourceFile;
use typedown_jsonschema::refpath;
use typedown_jsonschema::{
    JsonSchemaRenderer, RenderContext, RenderOptions, Renderer, SchemaDialect,
};

#[derive(Parser)]
#[command(name = "schema-render")]
#[command(about = "Render typedown AST files to JSON Schema documents")]
struct Cli {
    /// AST file or directory of AST files (*.ast.json)
    input: PathBuf,

    /// Project root the AST paths are relative to
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Output directory (artifacts mirror the input layout)
    #[arg(short, long, default_value = "schemas")]
    out: PathBuf,

    /// Target dialect
    #[arg(short, long, value_enum, default_value = "draft-2020-12")]
    dialect: DialectArg,

    /// Emit `additionalProperties: true` on strict objects
    #[arg(long)]
    allow_additional_properties: bool,

    /// Print documents to stdout instead of writing files
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum DialectArg {
    #[value(name = "draft-07")]
    Draft07,
    #[value(name = "draft-2019-09")]
    Draft201909,
    #[value(name = "draft-2020-12")]
    Draft202012,
}

impl From<DialectArg> for SchemaDialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Draft07 => SchemaDialect::Draft07,
            DialectArg::Draft201909 => SchemaDialect::Draft201909,
            DialectArg::Draft202012 => SchemaDialect::Draft202012,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let options = RenderOptions {
        dialect: cli.dialect.into(),
        allow_additional_properties: cli.allow_additional_properties,
    };
    let renderer = JsonSchemaRenderer::new(options);

    let inputs = collect_inputs(&cli.input)?;
    if inputs.is_empty() {
        bail!("no AST files found under {:?}", cli.input);
    }

    println!("📐 Rendering {} file(s), dialect {}", inputs.len(), options.dialect);

    for input in inputs {
        let relative = source_relative_path(&input, &cli.root);
        let text = fs::read_to_string(&input)
            .with_context(|| format!("reading {input:?}"))?;
        let file: SourceFile = serde_json::from_str(&text)
            .with_context(|| format!("parsing AST in {input:?}"))?;

        let output = renderer
            .transform(&file, &RenderContext::new(&relative))
            .with_context(|| format!("rendering {relative}"))?;

        for item in output.diagnostics.items() {
            eprintln!("⚠️  {item}");
        }

        if cli.dry_run {
            println!("--- {relative}");
            print!("{}", output.text);
        } else {
            let artifact = cli.out.join(refpath::artifact_path(&relative));
            if let Some(parent) = artifact.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {parent:?}"))?;
            }
            fs::write(&artifact, &output.text)
                .with_context(|| format!("writing {artifact:?}"))?;
            println!("  {relative} -> {}", artifact.display());
        }
    }

    Ok(())
}

/// Gather AST files: a single file as-is, a directory recursively
fn collect_inputs(input: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(".ast.json"))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Project-root-relative forward-slash path, with the parser's
/// `.ast.json` suffix stripped back to the source name
fn source_relative_path(input: &Path, root: &Path) -> String {
    let relative = input.strip_prefix(root).unwrap_or(input);
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    match joined.strip_suffix(".ast.json") {
        Some(stem) => format!("{stem}.td"),
        None => joined,
    }
}
