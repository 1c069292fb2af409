use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "glyphpen", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every node of the built stroke graph with its address.
    Addresses(AddressesArgs),
    /// Print the stroke order and pen timeline for an animation request.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct AddressesArgs {
    /// Input glyph tree JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Id given to the root node.
    #[arg(long, default_value = "eq")]
    root_id: String,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input glyph tree JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Animator config JSON (defaults apply to missing fields).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Id given to the root node.
    #[arg(long, default_value = "eq")]
    root_id: String,

    /// One selection unit as comma-separated addresses. Repeat for more units.
    #[arg(long = "select")]
    select: Vec<String>,

    /// Ordering mode.
    #[arg(long, value_enum, default_value_t = ModeChoice::Sequence)]
    mode: ModeChoice,

    /// In `sequence` mode, do not append the unselected strokes.
    #[arg(long)]
    no_auto_complete: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Sequence,
    SelectionOnly,
    Exclude,
    ExcludeKeep,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Addresses(args) => cmd_addresses(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn load_graph(
    animator: &glyphpen::StrokeAnimator,
    path: &Path,
    root_id: &str,
) -> anyhow::Result<glyphpen::StrokeGraphNode> {
    let tree = glyphpen::GlyphElement::from_path(path)?;
    let root = animator
        .build_graph(&tree, root_id, glyphpen::StrokeColor::BLACK)
        .with_context(|| format!("build stroke graph from '{}'", path.display()))?;
    Ok(root)
}

fn cmd_addresses(args: AddressesArgs) -> anyhow::Result<()> {
    let animator = glyphpen::StrokeAnimator::new(glyphpen::shared(glyphpen::PathSurface::new()));
    let root = load_graph(&animator, &args.in_path, &args.root_id)?;

    let mut lines = Vec::new();
    root.walk(&mut |node| {
        lines.push(format!(
            "{}\t{}\t{}{}",
            node.address(),
            node.id(),
            node.category().unwrap_or("-"),
            if node.is_drawable() { "\tdrawable" } else { "" },
        ));
    });
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => glyphpen::AnimatorConfig::from_path(path)?,
        None => glyphpen::AnimatorConfig::default(),
    };
    let surface = glyphpen::shared(glyphpen::PathSurface::new());
    let animator = glyphpen::StrokeAnimator::with_config(surface, config)?;
    let root = load_graph(&animator, &args.in_path, &args.root_id)?;

    let units: Vec<glyphpen::SelectionUnit> = args
        .select
        .iter()
        .enumerate()
        .map(|(i, list)| {
            glyphpen::SelectionUnit::from_addresses(
                format!("select-{i}"),
                list.split(',').map(str::trim).filter(|s| !s.is_empty()),
            )
        })
        .collect();

    let mode = match args.mode {
        ModeChoice::Sequence => glyphpen::SequenceMode::Sequence {
            auto_complete: !args.no_auto_complete,
        },
        ModeChoice::SelectionOnly => glyphpen::SequenceMode::SelectionOnly,
        ModeChoice::Exclude => glyphpen::SequenceMode::ExcludeAndDisable,
        ModeChoice::ExcludeKeep => glyphpen::SequenceMode::ExcludeWithoutDisabling,
    };

    let plan = animator.plan(&root, &units, mode)?;
    let out = serde_json::json!({
        "order": plan.timeline.reveal_order(),
        "disabled": plan
            .to_disable
            .iter()
            .map(|s| s.structural_address())
            .collect::<Vec<_>>(),
        "timeline": plan.timeline.summary()?,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&out).with_context(|| "serialize plan")?
    );
    Ok(())
}
