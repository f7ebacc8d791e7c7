//! Command-line interface for minixsd

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use minixsd::converters::{to_json, ConverterConfig};
#[cfg(feature = "cli")]
use minixsd::{Limits, Schema, SchemaBuilder, SchemaValidator, ValidationError, XmlParser};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "minixsd")]
#[command(author, version, about = "XML parsing and XML Schema validation tool", long_about = None)]
struct Cli {
    /// Resource limits applied while parsing
    #[arg(long, value_enum, default_value = "default", global = true)]
    limits: LimitsPreset,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(ValueEnum, Clone, Copy, Debug)]
enum LimitsPreset {
    Default,
    Strict,
    Permissive,
}

#[cfg(feature = "cli")]
impl LimitsPreset {
    fn limits(self) -> Limits {
        match self {
            LimitsPreset::Default => Limits::default(),
            LimitsPreset::Strict => Limits::strict(),
            LimitsPreset::Permissive => Limits::permissive(),
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate an XML document against an XSD schema
    Validate {
        /// Path to the XSD schema file
        #[arg(short, long, value_name = "SCHEMA")]
        schema: PathBuf,

        /// Path to the XML file to validate
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Parse an XML document and print it as JSON
    Parse {
        /// Path to the XML file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,

        /// Drop namespace prefixes from element names
        #[arg(long)]
        strip_namespaces: bool,
    },

    /// Inspect an XSD schema and display its definitions
    Inspect {
        /// Path to the XSD schema file
        #[arg(value_name = "SCHEMA")]
        schema: PathBuf,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

#[cfg(feature = "cli")]
type CliResult = minixsd::Result<bool>;

#[cfg(feature = "cli")]
fn main() {
    init_tracing();

    let cli = Cli::parse();
    let parser = XmlParser::with_limits(cli.limits.limits());

    let result = match cli.command {
        Commands::Validate { schema, file } => cmd_validate(&parser, &schema, &file),
        Commands::Parse {
            file,
            pretty,
            strip_namespaces,
        } => cmd_parse(&parser, &file, pretty, strip_namespaces),
        Commands::Inspect { schema, json } => cmd_inspect(&parser, &schema, json),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "cli")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn print_diagnostics(path: &Path, errors: &[ValidationError]) {
    for error in errors {
        println!("  - {}:{}", path.display(), error);
    }
}

/// Load and build a schema, printing its diagnostics on failure
#[cfg(feature = "cli")]
fn load_schema(parser: &XmlParser, path: &Path) -> minixsd::Result<Option<Schema>> {
    let text = fs::read_to_string(path)?;
    let (schema, errors) = SchemaBuilder::with_parser(parser.clone()).parse(&text).into_parts();
    if schema.is_none() {
        println!("✗ Schema could not be built");
        print_diagnostics(path, &errors);
    }
    Ok(schema)
}

#[cfg(feature = "cli")]
fn cmd_validate(parser: &XmlParser, schema_path: &Path, file: &Path) -> CliResult {
    let schema = match load_schema(parser, schema_path)? {
        Some(schema) => schema,
        None => return Ok(false),
    };

    let xml_content = fs::read_to_string(file)?;
    let errors = match parser.parse(&xml_content).into_result() {
        Ok(doc) => SchemaValidator::new(schema).validate(&doc),
        Err(errors) => errors,
    };

    if errors.is_empty() {
        println!("✓ Document is valid");
        Ok(true)
    } else {
        println!("✗ Document is invalid");
        println!();
        println!("Errors:");
        print_diagnostics(file, &errors);
        Ok(false)
    }
}

#[cfg(feature = "cli")]
fn cmd_parse(parser: &XmlParser, file: &Path, pretty: bool, strip_namespaces: bool) -> CliResult {
    let xml_content = fs::read_to_string(file)?;
    let doc = match parser.parse(&xml_content).into_result() {
        Ok(doc) => doc,
        Err(errors) => {
            println!("✗ Document could not be parsed");
            print_diagnostics(file, &errors);
            return Ok(false);
        }
    };

    let config = ConverterConfig::new().with_strip_namespaces(strip_namespaces);
    let json_value = to_json(&doc, &config);

    let json_str = if pretty {
        serde_json::to_string_pretty(&json_value)?
    } else {
        serde_json::to_string(&json_value)?
    };
    println!("{}", json_str);
    Ok(true)
}

#[cfg(feature = "cli")]
fn cmd_inspect(parser: &XmlParser, schema_path: &Path, json_output: bool) -> CliResult {
    let schema = match load_schema(parser, schema_path)? {
        Some(schema) => schema,
        None => return Ok(false),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&schema)?);
    } else {
        print_schema_summary(&schema);
    }
    Ok(true)
}

#[cfg(feature = "cli")]
fn print_schema_summary(schema: &Schema) {
    println!("minixsd v{}", minixsd::VERSION);
    println!();
    println!("Schema Information:");
    match &schema.target_namespace {
        Some(ns) => println!("  Target Namespace: {}", ns),
        None => println!("  Target Namespace: (none)"),
    }
    println!();
    println!("Statistics:");
    println!("  Global Elements: {}", schema.elements.len());
    println!("  Complex Types: {}", schema.complex_types.len());
    println!("  Simple Types: {}", schema.simple_types.len());

    println!("\n=== Global Elements ===");
    for (name, elem) in &schema.elements {
        println!("  {} : {}", name, elem.type_ref);
    }

    println!("\n=== Complex Types ===");
    for (name, ct) in &schema.complex_types {
        println!("  {}", name);
        for particle in &ct.elements {
            println!(
                "    {} : {} [{}..{}]",
                particle.name, particle.type_ref, particle.occurs.min, particle.occurs.max
            );
        }
        for attr in &ct.attributes {
            println!("    @{} : {}", attr.name, attr.type_name);
        }
    }

    println!("\n=== Simple Types ===");
    for (name, st) in &schema.simple_types {
        println!("  {} (base {})", name, st.base_type);
        for facet in &st.facets {
            println!("    {} = {}", facet.kind, facet.lexical);
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
