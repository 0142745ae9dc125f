//! Use Case Catalog CLI

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use wl_core::{
    report::{self, ReportFormat},
    Catalog, CatalogPolicy, CategoryMatch, ContentSource, FilterSpec, InputModality, LoadPolicy,
    SortKey, UseCaseStore,
};

#[derive(Parser)]
#[command(name = "wl-catalog")]
#[command(about = "Use case catalog tools")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Content directory or bundle file
    #[arg(short, long, global = true, default_value = "./content/usecases")]
    content: PathBuf,

    /// Catalog policy file (TOML)
    #[arg(short, long, global = true)]
    policy: Option<PathBuf>,

    /// Skip malformed records instead of failing
    #[arg(long, global = true)]
    skip_invalid: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List use cases matching the given filters
    List {
        /// Input modality (Visual, Audio, Social Media, Text, Sensors, All)
        #[arg(short, long)]
        input: Option<String>,

        /// Exact category (repeatable, any of)
        #[arg(long)]
        category: Vec<String>,

        /// Audience segment resolved through the policy
        #[arg(long)]
        segment: Option<String>,

        /// Persona substring (repeatable, any of)
        #[arg(long)]
        persona: Vec<String>,

        /// Exact tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Free-text search over title, description and tags
        #[arg(short, long)]
        search: Option<String>,

        /// Ids to leave out (comma-separated), on top of the policy's list
        #[arg(long)]
        exclude: Option<String>,

        /// Ordering (original, priority, title)
        #[arg(long, default_value = "original")]
        sort: String,

        /// Output format (markdown, json)
        #[arg(short, long, default_value = "markdown")]
        output: String,
    },

    /// Show a single use case
    Show {
        /// Use case id
        id: String,

        /// Output format (markdown, json)
        #[arg(short, long, default_value = "markdown")]
        output: String,
    },

    /// Print the use cases for a persona page
    Persona {
        /// Persona slug, e.g. city-planner
        slug: String,
    },

    /// Print unique categories, personas, tags and input counts
    Facets,

    /// Check every content record and report problems
    Validate,

    /// Split a bundle file into one file per use case
    Split {
        /// Bundle file shaped { "usecases": [...] }
        #[arg(short, long)]
        bundle: PathBuf,

        /// Output directory
        #[arg(short = 'O', long)]
        out: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set subscriber: {}", e);
    }

    let load_policy = if cli.skip_invalid { LoadPolicy::SkipInvalid } else { LoadPolicy::FailFast };

    match cli.command {
        Commands::List { input, category, segment, persona, tag, search, exclude, sort, output } => {
            let catalog = open_catalog(&cli.content, cli.policy.as_deref(), load_policy);
            let spec = build_spec(&catalog, input, category, segment, persona, tag, search, exclude);
            cmd_list(&catalog, spec, &sort, &output);
        }
        Commands::Show { id, output } => {
            let catalog = open_catalog(&cli.content, cli.policy.as_deref(), load_policy);
            cmd_show(&catalog, &id, &output);
        }
        Commands::Persona { slug } => {
            let catalog = open_catalog(&cli.content, cli.policy.as_deref(), load_policy);
            cmd_persona(&catalog, &slug);
        }
        Commands::Facets => {
            let catalog = open_catalog(&cli.content, cli.policy.as_deref(), load_policy);
            cmd_facets(&catalog);
        }
        Commands::Validate => {
            cmd_validate(&cli.content);
        }
        Commands::Split { bundle, out } => {
            cmd_split(&bundle, &out);
        }
    }
}

fn open_catalog(content: &Path, policy: Option<&Path>, load_policy: LoadPolicy) -> Catalog {
    let source = match ContentSource::detect(content) {
        Ok(source) => source,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let store = match UseCaseStore::load(&source, load_policy) {
        Ok((store, _)) => store,
        Err(e) => {
            error!("Failed to load content: {}", e);
            std::process::exit(1);
        }
    };

    let policy = match policy.map(CatalogPolicy::load).transpose() {
        Ok(policy) => policy.unwrap_or_default(),
        Err(e) => {
            error!("Failed to load policy: {}", e);
            std::process::exit(1);
        }
    };

    Catalog::new(store, policy)
}

#[allow(clippy::too_many_arguments)]
fn build_spec(
    catalog: &Catalog,
    input: Option<String>,
    categories: Vec<String>,
    segment: Option<String>,
    personas: Vec<String>,
    tag: Option<String>,
    search: Option<String>,
    exclude: Option<String>,
) -> FilterSpec {
    let mut spec = FilterSpec::new();

    if let Some(input) = input {
        spec.input = match InputModality::parse_selector(&input) {
            Ok(input) => input,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        };
    }

    spec.category = if !categories.is_empty() {
        Some(CategoryMatch::Exact(categories))
    } else {
        segment.map(|s| catalog.policy().segment_filter(&s))
    };
    spec.personas = personas;
    spec.tag = tag;
    spec.search = search;

    if let Some(exclude) = exclude {
        spec = spec.excluding(
            exclude
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(String::from),
        );
    }

    spec
}

fn cmd_list(catalog: &Catalog, spec: FilterSpec, sort: &str, output: &str) {
    info!("Filtering {} use cases ({} active filters)", catalog.len(), spec.active_filter_count());

    let results = catalog.listing(spec, SortKey::from_param(Some(sort)));

    match report::render_list(&results, ReportFormat::from_name(output)) {
        Ok(content) => println!("{}", content),
        Err(e) => {
            error!("Failed to render results: {}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_show(catalog: &Catalog, id: &str, output: &str) {
    let usecase = match catalog.get_by_id(id) {
        Ok(usecase) => usecase,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    match report::render_usecase(usecase, ReportFormat::from_name(output)) {
        Ok(content) => println!("{}", content),
        Err(e) => {
            error!("Failed to render use case: {}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_persona(catalog: &Catalog, slug: &str) {
    let view = catalog.persona_view(slug);

    println!("\n{}\n{}", view.persona.title, "=".repeat(50));
    println!("{}\n", view.persona.description);

    if view.usecases.is_empty() {
        println!("No use cases match this persona.");
        return;
    }

    match report::render_list(&view.usecases, ReportFormat::Markdown) {
        Ok(content) => println!("{}", content),
        Err(e) => {
            error!("Failed to render use cases: {}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_facets(catalog: &Catalog) {
    let facets = catalog.facets();

    println!("\nInputs\n{}", "=".repeat(50));
    for entry in &facets.inputs {
        println!("  {:<20} {}", entry.input.label(), entry.count);
    }

    println!("\nCategories:");
    for category in &facets.categories {
        println!("  - {}", category);
    }

    println!("\nPersonas:");
    for persona in &facets.personas {
        println!("  - {}", persona);
    }

    println!("\nTags:");
    for tag in &facets.tags {
        println!("  - {}", tag);
    }
}

fn cmd_validate(content: &Path) {
    info!("Validating content: {}", content.display());

    let source = match ContentSource::detect(content) {
        Ok(source) => source,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    match UseCaseStore::load(&source, LoadPolicy::SkipInvalid) {
        Ok((_, report)) => {
            println!("\nContent Validation\n{}", "=".repeat(50));
            println!("Valid records: {}", report.loaded);

            if report.is_clean() {
                println!("All records VALID");
            } else {
                println!("Invalid records: {}", report.skipped.len());
                for (path, reason) in &report.skipped {
                    println!("  - {}: {}", path.display(), reason);
                }
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!("Validation failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_split(bundle: &Path, out: &Path) {
    info!("Splitting {} into {}", bundle.display(), out.display());

    let store = match UseCaseStore::load(&ContentSource::Bundle(bundle.to_path_buf()), LoadPolicy::FailFast) {
        Ok((store, _)) => store,
        Err(e) => {
            error!("Failed to read bundle: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = std::fs::create_dir_all(out) {
        error!("Failed to create {}: {}", out.display(), e);
        std::process::exit(1);
    }

    for usecase in store.iter() {
        let path = out.join(format!("{}.json", usecase.id));
        let written = serde_json::to_string_pretty(usecase)
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(&path, json).map_err(|e| e.to_string()));

        match written {
            Ok(()) => println!("Created: {}", path.display()),
            Err(e) => {
                error!("Failed to write {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    println!("\nSplit {} use cases into individual files", store.len());
}
