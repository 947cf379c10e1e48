//! Wikivoyage CLI - fetch travel guide pages as Markdown sections

use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use wikivoyage::{PageResult, SearchResult, Wiki, WikiBuilder};

/// Output format
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Markdown with frontmatter
    #[default]
    Md,
    /// JSON format
    Json,
}

/// Wikivoyage - travel guide pages as Markdown
#[derive(Parser, Debug)]
#[command(name = "wikivoyage")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Custom User-Agent
    #[arg(long, global = true)]
    user_agent: Option<String>,

    /// Wiki origin, e.g. https://de.wikivoyage.org
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Proxy URL for all requests
    #[arg(long, global = true)]
    proxy: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch a page and print its sections
    Get {
        /// Page URL
        url: String,

        /// Output format
        #[arg(long, short, default_value = "md")]
        output: OutputFormat,
    },
    /// Search page titles
    Search {
        /// Search query
        query: String,

        /// Output format
        #[arg(long, short, default_value = "md")]
        output: OutputFormat,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let wiki = match wiki_builder(&cli).build() {
        Ok(wiki) => wiki,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Get { ref url, output } => run_get(&wiki, url, output).await,
        Commands::Search { ref query, output } => run_search(&wiki, query, output).await,
    }
}

fn wiki_builder(cli: &Cli) -> WikiBuilder {
    let mut builder = Wiki::builder();

    if let Some(ref ua) = cli.user_agent {
        builder = builder.user_agent(ua);
    }
    if let Some(ref base_url) = cli.base_url {
        builder = builder.base_url(base_url);
    }
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(ref proxy) = cli.proxy {
        builder = builder.proxy(proxy);
    }

    builder
}

async fn run_get(wiki: &Wiki, url: &str, output: OutputFormat) {
    match wiki.get(url).await {
        Ok(page) => match output {
            OutputFormat::Md => writeln_safe(&format_page_md(&page)),
            OutputFormat::Json => print_json(&page),
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run_search(wiki: &Wiki, query: &str, output: OutputFormat) {
    match wiki.search(query).await {
        Ok(results) => match output {
            OutputFormat::Md => writeln_safe(&format_search_md(&results)),
            OutputFormat::Json => print_json(&results),
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error serializing response: {}", e);
        std::process::exit(1);
    });
    writeln_safe(&json);
}

/// Format a page as markdown with frontmatter, one `##` block per section
fn format_page_md(page: &PageResult) -> String {
    let mut output = String::new();

    output.push_str("---\n");
    output.push_str(&format!("url: {}\n", page.url()));
    output.push_str(&format!("sections: {}\n", page.sections().len()));
    output.push_str("---\n");

    for section in page.sections() {
        output.push_str(&format!("\n## {}\n\n{}\n", section.title(), section.content()));
    }

    output
}

/// Format search results as a markdown link list
fn format_search_md(results: &SearchResult) -> String {
    results
        .iter()
        .map(|(title, link)| format!("- [{}]({})", title, link))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikivoyage::Section;

    #[test]
    fn test_format_page_md() {
        let page = PageResult::new(
            "https://en.wikivoyage.org/wiki/Paris",
            vec![
                Section::new("Paris", "Capital of **France**."),
                Section::new("See", "- Louvre"),
            ],
        );

        let output = format_page_md(&page);

        assert!(output.starts_with("---\n"));
        assert!(output.contains("url: https://en.wikivoyage.org/wiki/Paris\n"));
        assert!(output.contains("sections: 2\n"));
        assert!(output.contains("\n## Paris\n\nCapital of **France**.\n"));
        assert!(output.ends_with("\n## See\n\n- Louvre\n"));
    }

    #[test]
    fn test_format_page_md_empty() {
        let page = PageResult::new("https://en.wikivoyage.org/wiki/Nowhere", Vec::new());
        let output = format_page_md(&page);

        assert!(output.contains("sections: 0\n"));
        assert!(output.ends_with("---\n"));
    }

    #[test]
    fn test_format_search_md() {
        let results = vec![
            ("Paris".to_string(), "https://en.wikivoyage.org/wiki/Paris".to_string()),
            ("Parma".to_string(), "https://en.wikivoyage.org/wiki/Parma".to_string()),
        ];

        assert_eq!(
            format_search_md(&results),
            "- [Paris](https://en.wikivoyage.org/wiki/Paris)\n- [Parma](https://en.wikivoyage.org/wiki/Parma)"
        );
        assert_eq!(format_search_md(&Vec::new()), "");
    }

    #[test]
    fn test_cli_parses_global_options() {
        let cli = Cli::try_parse_from([
            "wikivoyage",
            "get",
            "https://en.wikivoyage.org/wiki/Paris",
            "--timeout",
            "5",
            "-o",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.timeout, Some(5));
        assert!(matches!(
            cli.command,
            Commands::Get {
                output: OutputFormat::Json,
                ..
            }
        ));
        assert!(wiki_builder(&cli).build().is_ok());
    }
}
