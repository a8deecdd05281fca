use planets::{
	bench::Benchmark,
	config::ScenarioConfig,
	driver::{Control, Executor, Presenter, Simulation},
	Coord, Layout, Precision, Scheduler, Store,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::{
	fs::File,
	io::{BufReader, Write},
	path::PathBuf,
};

#[derive(Parser, Debug)]
#[command(about = "Brute-force 2D gravitational N-body simulation")]
struct Args {
	/// YAML scenario file
	#[arg(short, long)]
	config: Option<PathBuf>,
	/// single | double
	#[arg(long)]
	precision: Option<Precision>,
	/// aos | soa
	#[arg(long)]
	layout: Option<Layout>,
	/// Number of particles
	#[arg(short = 'n', long)]
	count: Option<usize>,
	#[arg(long)]
	seed: Option<u64>,
	/// Worker threads, 0 to step on the main thread
	#[arg(short, long, conflicts_with = "all_cores")]
	workers: Option<usize>,
	/// One worker per available core
	#[arg(long)]
	all_cores: bool,
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Step a fixed number of times, logging a summary of the positions
	Run {
		#[arg(long, default_value_t = 100)]
		steps: u64,
		/// Log every this many steps
		#[arg(long, default_value_t = 10)]
		every: u64,
	},
	/// Measure throughput in batches of about one second
	Bench {
		/// Number of batches, 0 to run until interrupted
		#[arg(long, default_value_t = 0)]
		batches: usize,
	},
}

fn load_config(args: &Args) -> Result<ScenarioConfig> {
	let mut config = match &args.config {
		Some(path) => {
			let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
			serde_yaml::from_reader(BufReader::new(file))
				.with_context(|| format!("cannot parse {}", path.display()))?
		}
		None => ScenarioConfig::default(),
	};
	if let Some(precision) = args.precision {
		config.precision = precision;
	}
	if let Some(layout) = args.layout {
		config.world.layout = layout;
	}
	if let Some(count) = args.count {
		config.world.count = count;
	}
	if let Some(seed) = args.seed {
		config.world.seed = seed;
	}
	match args.workers {
		Some(0) => config.workers = None,
		Some(workers) => config.workers = Some(workers),
		None => {}
	}
	Ok(config)
}

/// Logs the centroid and extent of the population, quits after a step budget
struct Summary {
	steps: u64,
	every: u64,
	frame: u64,
}

impl<T: Coord> Presenter<T> for Summary {
	fn present(&mut self, store: &Store<T>) -> Control {
		if self.frame % self.every.max(1) == 0 || self.frame == self.steps {
			let n = store.len().max(1) as f64;
			let (mut cx, mut cy) = (0.0, 0.0);
			let (mut min, mut max) = ([f64::INFINITY; 2], [f64::NEG_INFINITY; 2]);
			for [x, y] in store.positions() {
				let (x, y) = (x.widen(), y.widen());
				cx += x;
				cy += y;
				min = [min[0].min(x), min[1].min(y)];
				max = [max[0].max(x), max[1].max(y)];
			}
			log::info!(
				"step {:>6}: centroid ({:.2}, {:.2}) extent ({:.1}, {:.1})..({:.1}, {:.1})",
				self.frame,
				cx / n,
				cy / n,
				min[0],
				min[1],
				max[0],
				max[1]
			);
		}
		if self.frame >= self.steps {
			return Control::Quit;
		}
		self.frame += 1;
		Control::Continue
	}
}

fn execute<T>(args: &Args, config: &ScenarioConfig) -> Result<()>
where
	T: Coord + rand::distributions::uniform::SampleUniform,
{
	let settings = config.settings::<T>()?;
	let count = settings.count;
	let executor = if args.all_cores {
		Executor::Parallel(Scheduler::with_available_parallelism()?)
	} else {
		Executor::new(config.workers)?
	};
	log::info!(
		"{} particles, {} precision, {} layout, {}",
		count,
		T::PRECISION,
		settings.layout,
		match &executor {
			Executor::Parallel(scheduler) => format!("{} workers", scheduler.workers()),
			Executor::Serial => "serial".to_string(),
		}
	);
	let mut sim = Simulation::new(settings, executor)?;

	match args.command {
		Command::Run { steps, every } => {
			let exit = sim.run(&mut Summary {
				steps,
				every,
				frame: 0,
			});
			log::info!("Stopped after {} steps", exit.steps);
		}
		Command::Bench { batches } => {
			let mut bench = Benchmark::new(count);
			let stdout = std::io::stdout();
			let mut batch = 0;
			while batches == 0 || batch < batches {
				let report = bench.batch(|| sim.step());
				let mut out = stdout.lock();
				writeln!(out, "{}", report)?;
				out.flush()?;
				batch += 1;
			}
		}
	}
	Ok(())
}

fn main() -> Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();
	let config = load_config(&args)?;
	match config.precision {
		Precision::Single => execute::<f32>(&args, &config),
		Precision::Double => execute::<f64>(&args, &config),
	}
}
