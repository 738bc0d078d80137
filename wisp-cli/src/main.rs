//! wisp CLI
//!
//! Lays out a JSON document fixture and prints the box tree and the
//! generated elements.
//!
//! Usage:
//!   wisp <fixture.json>                 Print box tree and elements
//!   wisp <fixture.json> --json          Print elements as JSON
//!   wisp <fixture.json> --width 480     Override the viewport width
//!   wisp <fixture.json> --config c.json Load engine tunables
//!   wisp <fixture.json> --verbose       Show debug logging

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use serde::Deserialize;
use tracing::Level;
use wisp_browser::{Element, ElementKind, Generator};
use wisp_css::{
    ApproximateFontMetrics, ImageTable, LayoutConfig, Rect, RuleSheet, Size,
    StyleAttributeSheet, Stylesheet,
};
use wisp_dom::{DomTree, NodeFixture};

#[derive(Parser, Debug)]
#[command(name = "wisp", version, about = "Lay out a document fixture")]
struct Cli {
    /// Fixture file describing the document, stylesheets, and images.
    fixture: PathBuf,

    /// Print the element list as JSON instead of the text report.
    #[arg(short, long)]
    json: bool,

    /// JSON file with layout tunables. Missing fields keep their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Viewport width, overriding the fixture.
    #[arg(short, long)]
    width: Option<i32>,

    /// Log layout and generation events.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Deserialize)]
struct Viewport {
    width: i32,
    height: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Fixture {
    #[serde(default)]
    viewport: Viewport,
    #[serde(default)]
    stylesheets: Vec<RuleSheet>,
    /// Known image sizes as `[width, height]`.
    #[serde(default)]
    images: HashMap<String, [i32; 2]>,
    document: Vec<NodeFixture>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let fixture: Fixture = read_json(&cli.fixture)?;
    let config: LayoutConfig = match &cli.config {
        Some(path) => read_json(path)?,
        None => LayoutConfig::default(),
    };

    let tree = DomTree::from_fixture(&fixture.document);
    let images = ImageTable(
        fixture
            .images
            .into_iter()
            .map(|(url, [width, height])| (url, Size::new(width, height)))
            .collect(),
    );

    let mut stylesheets: Vec<Box<dyn Stylesheet>> = fixture
        .stylesheets
        .into_iter()
        .map(|sheet| Box::new(sheet) as Box<dyn Stylesheet>)
        .collect();
    stylesheets.push(Box::new(StyleAttributeSheet));

    let width = cli.width.unwrap_or(fixture.viewport.width);
    let viewport = Rect::new(0, 0, width, fixture.viewport.height);

    let mut generator = Generator::new(stylesheets, viewport, config);
    let _ = generator
        .generate_layout(&tree, &ApproximateFontMetrics, &images)
        .context("layout failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(generator.elements())
            .context("failed to serialize elements")?;
        println!("{json}");
        return Ok(());
    }

    println!("{}", "=== Box Tree ===".bold());
    if let Some(root) = generator.layout_root() {
        print!("{}", root.dump(&tree));
    }

    println!();
    println!(
        "{}",
        format!("=== Elements ({}) ===", generator.elements().len()).bold()
    );
    for element in generator.elements() {
        print_element(element);
    }

    if !generator.links().is_empty() {
        println!();
        println!("{}", "=== Links ===".bold());
        for (id, href) in generator.links() {
            println!("  {} {}", format!("#{}", id.0).yellow(), href);
        }
    }

    if !generator.image_requests().is_empty() {
        println!();
        println!("{}", "=== Images ===".bold());
        for request in generator.image_requests() {
            let state = if request.pending { "pending" } else { "sized" };
            println!(
                "  {} {} ({})",
                format!("#{}", request.image_id.0).yellow(),
                request.url,
                state.dimmed()
            );
        }
    }

    let overflow = generator.overflow();
    println!();
    println!("overflow: {}x{}", overflow.width, overflow.height);

    Ok(())
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn print_element(element: &Element) {
    let rect = element.dimensions().content;
    let geometry = format!("({}, {}) {}x{}", rect.x, rect.y, rect.width, rect.height);
    let id = element
        .id
        .map_or_else(String::new, |id| format!("#{} ", id.0));

    let summary = match &element.kind {
        ElementKind::Label { text, link, .. } => match link {
            Some(link) => format!("{} {:?} -> link #{}", "label".cyan(), text, link.0),
            None => format!("{} {:?}", "label".cyan(), text),
        },
        ElementKind::Button { text, .. } => format!("{} {:?}", "button".green(), text),
        ElementKind::Image { url, image_id } => {
            format!("{} {} (image #{})", "image".magenta(), url, image_id.0)
        }
        ElementKind::TextField { name, buffer, .. } => {
            format!("{} {}={:?}", "text".green(), name, buffer)
        }
        ElementKind::Select {
            name,
            options,
            selected_index,
            ..
        } => format!(
            "{} {} [{} options, selected {}]",
            "select".green(),
            name,
            options.len(),
            selected_index
        ),
        ElementKind::Form { method, target } => {
            format!("{} {} {}", "form".blue(), method, target)
        }
    };

    let form = element
        .form()
        .map_or_else(String::new, |form| format!(" in form #{}", form.0));
    println!(
        "  {}{} {}{}",
        id.yellow(),
        summary,
        geometry.dimmed(),
        form
    );
}
