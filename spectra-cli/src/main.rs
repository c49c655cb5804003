use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use spectra::demos::DemoKind;
use spectra::settings::{prompt_signal, OutputSettings};
use spectra::{
    load_settings, present_all, CsvPresenter, DemoSettings, JsonPresenter, OutputFormat, Presenter,
    TextPresenter,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "spectra", version, about = "Spectral estimation demos: FFT, periodogram, Welch, 2-D filters and point-source fields")]
struct Cli {
    /// Settings file (.json, .yaml or .yml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fundamental frequency in Hz
    #[arg(long, global = true)]
    f0: Option<f64>,

    /// Amplitude of the fundamental
    #[arg(long, global = true)]
    amplitude: Option<f64>,

    /// Sampling rate in Hz
    #[arg(long, global = true)]
    sample_rate: Option<f64>,

    /// Number of samples to synthesize
    #[arg(long, global = true)]
    samples: Option<usize>,

    /// Standard deviation of the additive noise
    #[arg(long, global = true)]
    noise_std: Option<f64>,

    /// Fixed noise seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, global = true)]
    format: Option<Format>,

    /// Directory for json/csv/pgm output
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Direct FFT in physical units, with zero-padding
    Fft,
    /// FFT, flat-top periodogram and Welch, peak-normalised
    Psd,
    /// FFT, periodogram and Welch in absolute units
    Signal,
    /// Spline edge filter, FFT convolution and Gaussian blur
    Image,
    /// Animated pressure field of random point sources in water
    Field,
    /// Every demo in turn
    All,
    /// Ask for centre frequency and amplitude, then run the psd demo
    Prompt,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Format {
    Text,
    Json,
    Csv,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Csv => OutputFormat::Csv,
        }
    }
}

impl Cli {
    fn overrides(&self) -> DemoSettings {
        DemoSettings {
            f0: self.f0,
            amplitude: self.amplitude,
            sample_rate: self.sample_rate,
            num_samples: self.samples,
            noise_std: self.noise_std,
            seed: self.seed,
            output: OutputSettings {
                format: self.format.map(OutputFormat::from),
                dir: self.out_dir.clone(),
            },
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn presenter_for(output: &OutputSettings) -> Result<Box<dyn Presenter>> {
    let presenter: Box<dyn Presenter> = match output.format() {
        OutputFormat::Text => Box::new(TextPresenter::new(io::stdout())),
        OutputFormat::Json => Box::new(
            JsonPresenter::new(output.dir())
                .with_context(|| format!("creating {}", output.dir().display()))?,
        ),
        OutputFormat::Csv => Box::new(
            CsvPresenter::new(output.dir())
                .with_context(|| format!("creating {}", output.dir().display()))?,
        ),
    };
    Ok(presenter)
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => {
            load_settings(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => DemoSettings::default(),
    };
    settings = settings.merge(cli.overrides());
    log::debug!("effective settings: {settings:?}");

    let demos: Vec<DemoKind> = match cli.command {
        Command::Fft => vec![DemoKind::Fft],
        Command::Psd => vec![DemoKind::Psd],
        Command::Signal => vec![DemoKind::Signal],
        Command::Image => vec![DemoKind::Image],
        Command::Field => vec![DemoKind::Field],
        Command::All => DemoKind::ALL.to_vec(),
        Command::Prompt => {
            let config = prompt_signal(&mut io::stdin().lock(), &mut io::stdout())?;
            settings.f0 = Some(config.f0());
            settings.amplitude = Some(config.amplitude());
            vec![DemoKind::Psd]
        }
    };

    let mut presenter = presenter_for(&settings.output)?;
    for demo in demos {
        let panels = demo
            .run(&settings)
            .with_context(|| format!("{} demo failed", demo.name()))?;
        present_all(presenter.as_mut(), &panels)?;
    }
    Ok(())
}
