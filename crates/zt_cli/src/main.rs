//! `zt`: step response of a first-order lag discretized with the bilinear
//! transform.
//!
//! Builds `1 / (1 + tau * s)`, derives the Z-domain filter, drives it with a
//! pulse and draws each output sample as a bar.

mod config;
mod render;

use anyhow::{Context as _, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::Level;
use zt_ast::build::{add2, div2, mul2};
use zt_ast::{Context, DisplayExpr, ExprId};
use zt_filter::IirFilter;
use zt_math::TransformOptions;

use config::DemoConfig;

#[derive(Parser, Debug)]
#[command(name = "zt", version, about = "Bilinear-transform IIR step-response demo")]
struct Cli {
    /// TOML file with demo parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective configuration to this path and exit
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Sample period T
    #[arg(long)]
    sample_period: Option<f64>,

    /// Lag time constant tau
    #[arg(long)]
    tau: Option<f64>,

    /// Number of samples to draw
    #[arg(long)]
    samples: Option<usize>,

    /// Sample index at which the input drops to zero
    #[arg(long)]
    step_off: Option<usize>,

    /// Bar length for an output of 1.0
    #[arg(long)]
    bar_width: Option<f64>,

    /// Character used to draw bars
    #[arg(long)]
    bar_char: Option<char>,

    /// Extraction node budget (0 = unlimited)
    #[arg(long)]
    max_nodes: Option<usize>,

    /// Print the transfer function before running
    #[arg(long, default_value_t = false)]
    show_transfer: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn resolve_config(&self) -> DemoConfig {
        let mut config = match &self.config {
            Some(path) => DemoConfig::load(path),
            None => DemoConfig::default(),
        };
        if let Some(v) = self.sample_period {
            config.sample_period = v;
        }
        if let Some(v) = self.tau {
            config.tau = v;
        }
        if let Some(v) = self.samples {
            config.samples = v;
        }
        if let Some(v) = self.step_off {
            config.step_off = v;
        }
        if let Some(v) = self.bar_width {
            config.bar_width = v;
        }
        if let Some(v) = self.bar_char {
            config.bar_char = v;
        }
        if let Some(v) = self.max_nodes {
            config.max_nodes_created = v;
        }
        config
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// `1 / (1 + tau * s)`
fn first_order_lag(ctx: &mut Context) -> ExprId {
    let one = ctx.one();
    let tau = ctx.var("tau");
    let s = ctx.laplace();
    let tau_s = mul2(ctx, tau, s);
    let den = add2(ctx, one, tau_s);
    div2(ctx, one, den)
}

fn run(config: &DemoConfig, show_transfer: bool) -> Result<()> {
    let mut ctx = Context::new();
    let h_s = first_order_lag(&mut ctx);
    let laplace_text = DisplayExpr::new(&ctx, h_s).to_string();

    let options = TransformOptions {
        budget: config.budget(),
    };
    let mut filter: IirFilter<f64> = IirFilter::from_laplace_with(ctx, h_s, &options)
        .with_context(|| format!("cannot realize {laplace_text}"))?;
    filter
        .set_sample_period(config.sample_period)
        .context("setting sample period")?;
    filter
        .set_variable_by_name("tau", config.tau)
        .context("setting tau")?;
    tracing::info!(
        sample_period = config.sample_period,
        tau = config.tau,
        order = filter.order(),
        "filter ready"
    );

    if show_transfer {
        println!("H(s) = {laplace_text}");
        println!(
            "H(Z) = {}",
            filter
                .fraction()
                .display(filter.context())
                .with_indeterminate("Z")
        );
        let bound = filter.bound_fraction()?;
        println!(
            "     = {}",
            bound.display(filter.context()).with_indeterminate("Z")
        );
    }

    for i in 0..config.samples {
        let y = filter
            .process_one_sample(config.input_at(i))
            .with_context(|| format!("processing sample {i}"))?;
        println!("{}", render::bar(y, config.bar_width, config.bar_char));
    }

    let last = filter
        .process_one_sample(config.input_at(config.samples))
        .context("processing final sample")?;
    println!("final: {last}");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.resolve_config();
    if let Some(path) = &cli.write_config {
        config
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
        return Ok(());
    }
    run(&config, cli.show_transfer)
}
