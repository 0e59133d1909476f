use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use parallax_core::params::ring_dash_offset;
use parallax_core::{
    AppConfig, BoundingBox, DerivedVisualParams, GeometrySnapshot, Progress, ProgressStrategy,
    ScrollEngine, StaticViewport,
};

const TARGET: &str = "target";

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    WholePage,
    ElementRelative,
    SectionEntry,
}

impl From<StrategyArg> for ProgressStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::WholePage => ProgressStrategy::WholePage,
            StrategyArg::ElementRelative => ProgressStrategy::ElementRelative,
            StrategyArg::SectionEntry => ProgressStrategy::SectionEntry,
        }
    }
}

#[derive(Debug, Args)]
pub struct ProgressArgs {
    /// Current scroll offset
    #[arg(long, default_value_t = 0.0)]
    pub scroll: f64,
    /// Viewport height
    #[arg(long, default_value_t = 800.0)]
    pub viewport: f64,
    /// Document height
    #[arg(long, default_value_t = 3000.0)]
    pub document: f64,
    /// Element top in document coordinates
    #[arg(long)]
    pub top: Option<f64>,
    /// Element height
    #[arg(long, default_value_t = 0.0)]
    pub height: f64,
    /// Progress strategy (defaults to engine.progress_strategy)
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    strategy: &'static str,
    progress: Progress,
    percent: u8,
    ring_dash_offset: f64,
    visibility: f64,
    in_view: bool,
    params: DerivedVisualParams,
}

fn report(config: &AppConfig, args: &ProgressArgs) -> Report {
    let mut engine = ScrollEngine::new(&config.engine);
    if let Some(strategy) = args.strategy {
        engine = engine.with_strategy(strategy.into());
    }

    let mut viewport = StaticViewport::new(args.viewport, args.document).with_scroll(args.scroll);
    if let Some(top) = args.top {
        viewport = viewport.with_element(TARGET, BoundingBox::from_height(top, args.height));
    }

    // Whole-page progress needs no element
    let snapshot = GeometrySnapshot::capture(&viewport, TARGET).or_else(|| {
        (engine.strategy() == ProgressStrategy::WholePage)
            .then(|| GeometrySnapshot::capture_page(&viewport))
    });

    match snapshot {
        Some(snapshot) => {
            let sample = engine.sample_snapshot(&snapshot);
            Report {
                strategy: engine.strategy().as_str(),
                progress: sample.progress,
                percent: sample.progress.percent(),
                ring_dash_offset: ring_dash_offset(sample.progress),
                visibility: sample.visibility,
                in_view: sample.in_view,
                params: sample.params,
            }
        }
        None => Report {
            strategy: engine.strategy().as_str(),
            progress: Progress::ZERO,
            percent: 0,
            ring_dash_offset: ring_dash_offset(Progress::ZERO),
            visibility: 0.0,
            in_view: false,
            params: DerivedVisualParams::NEUTRAL,
        },
    }
}

pub fn run(config: &AppConfig, args: &ProgressArgs) -> Result<()> {
    let report = report(config, args);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Strategy:     {}", report.strategy);
    println!("Progress:     {:.4} ({}%)", report.progress.value(), report.percent);
    println!("Ring offset:  {:.1}", report.ring_dash_offset);
    println!("Visibility:   {:.2}{}", report.visibility, if report.in_view { " (in view)" } else { "" });
    println!("Opacity:      {:.3}", report.params.opacity);
    println!("Offset:       {:.2}", report.params.vertical_offset);
    Ok(())
}

pub fn params(config: &AppConfig, progress: f64, json: bool) -> Result<()> {
    let progress = Progress::new(progress);
    let params = config.engine.mapper().derive(progress);

    if json {
        println!("{}", serde_json::to_string_pretty(&params)?);
    } else {
        println!("Progress:  {:.4}", progress.value());
        println!("Opacity:   {:.3}", params.opacity);
        println!("Offset:    {:.2}", params.vertical_offset);
    }
    Ok(())
}
