//! Schema documentation CLI
//!
//! Command-line interface for building object definitions, example payloads,
//! and cURL commands from schema documents.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use schema_docgen::{
    extract, generate_with, load_schema_auto, CurlOptions, ExtractOptions, Formatter,
    JsonFormatter, SchemaResolver, EXTENSION_KEYWORDS,
};

fn extension_help() -> String {
    format!(
        "Recognized extension keywords: {}",
        EXTENSION_KEYWORDS.join(", ")
    )
}

#[derive(Parser)]
#[command(name = "schema-docgen")]
#[command(about = "Derive documentation definitions and example payloads from JSON Schemas")]
#[command(version)]
#[command(after_help = extension_help())]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the flattened object definition for a schema
    Define {
        /// Schema source: file path or URL (http:// or https://)
        schema: String,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Indent width for embedded example strings
        #[arg(long, default_value_t = 2)]
        indent: usize,

        /// Merge schema-valued additionalProperties into examples
        #[arg(long)]
        include_additional_properties: bool,
    },

    /// Extract the representative example value for a schema
    Example {
        /// Schema source: file path or URL
        schema: String,

        /// Indent width for the rendered value
        #[arg(long, default_value_t = 2)]
        indent: usize,

        /// Merge schema-valued additionalProperties into examples
        #[arg(long)]
        include_additional_properties: bool,
    },

    /// Render a cURL command for a schema's example payload
    Curl {
        /// Schema source: file path or URL
        schema: String,

        /// Request URI
        #[arg(long)]
        uri: String,

        /// HTTP method (default: GET)
        #[arg(long, short)]
        method: Option<String>,

        /// Header in "Name: value" form (repeatable)
        #[arg(long = "header", short = 'H')]
        headers: Vec<String>,

        /// Start the query string with '&' (URI already has a query)
        #[arg(long)]
        append_query: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Define {
            schema,
            output,
            pretty,
            indent,
            include_additional_properties,
        } => run_define(
            &schema,
            output,
            pretty,
            indent,
            include_additional_properties,
        ),

        Commands::Example {
            schema,
            indent,
            include_additional_properties,
        } => run_example(&schema, indent, include_additional_properties),

        Commands::Curl {
            schema,
            uri,
            method,
            headers,
            append_query,
        } => run_curl(&schema, &uri, method.as_deref(), &headers, append_query),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn extract_options(include_additional_properties: bool) -> ExtractOptions {
    ExtractOptions {
        include_additional_properties,
    }
}

fn run_define(
    schema_source: &str,
    output: Option<PathBuf>,
    pretty: bool,
    indent: usize,
    include_additional: bool,
) -> Result<(), u8> {
    let schema = load_schema_auto(schema_source).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let resolver = SchemaResolver::with_formatter(JsonFormatter::new(indent))
        .extract_options(extract_options(include_additional));
    let definition = resolver.build(&schema).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let Some(definition) = definition else {
        eprintln!("Error: schema is flagged noDisplay");
        return Err(2);
    };

    let json_output = if pretty {
        serde_json::to_string_pretty(&definition)
    } else {
        serde_json::to_string(&definition)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}

fn run_example(schema_source: &str, indent: usize, include_additional: bool) -> Result<(), u8> {
    let schema = load_schema_auto(schema_source).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let value = extract(&schema, &extract_options(include_additional)).map_err(|e| {
        eprintln!("Error: {}", e);
        2u8
    })?;

    let rendered = JsonFormatter::new(indent).format(&value).map_err(|e| {
        eprintln!("Error: {}", e);
        2u8
    })?;

    println!("{}", rendered);
    Ok(())
}

fn run_curl(
    schema_source: &str,
    uri: &str,
    method: Option<&str>,
    headers: &[String],
    append_query: bool,
) -> Result<(), u8> {
    let schema = load_schema_auto(schema_source).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let data = extract(&schema, &ExtractOptions::default()).map_err(|e| {
        eprintln!("Error: {}", e);
        2u8
    })?;

    let mut header_map = serde_json::Map::new();
    for header in headers {
        let Some((name, value)) = header.split_once(':') else {
            eprintln!("Error: invalid header {:?}: expected \"Name: value\"", header);
            return Err(2);
        };
        header_map.insert(
            name.trim().to_string(),
            serde_json::Value::String(value.trim().to_string()),
        );
    }

    let command = generate_with(
        uri,
        method,
        (!header_map.is_empty()).then_some(&header_map),
        Some(&data),
        &JsonFormatter::default(),
        CurlOptions { append_query },
    )
    .map_err(|e| {
        eprintln!("Error: {}", e);
        2u8
    })?;

    println!("{}", command);
    Ok(())
}
