#![cfg(feature = "rand")]

use planets::{
	driver::{Control, Executor, Simulation},
	Coord, Layout, Scheduler, Settings, Store,
};

fn settings<T: Coord>(count: usize, layout: Layout, seed: u64) -> Settings<T> {
	Settings {
		count,
		seed,
		layout,
		..Settings::default()
	}
}

fn assert_close<T: Coord>(a: &[[T; 2]], b: &[[T; 2]], tolerance: f64) {
	assert_eq!(a.len(), b.len());
	for (p, q) in a.iter().zip(b) {
		for k in 0..2 {
			let (p, q) = (p[k].widen(), q[k].widen());
			assert!(
				(p - q).abs() <= tolerance * p.abs().max(1.0),
				"{} != {}",
				p,
				q
			);
		}
	}
}

#[test]
fn stays_finite() {
	let mut scheduler = Scheduler::new(4).unwrap();
	for layout in [Layout::Aos, Layout::Soa] {
		let mut single = Store::<f32>::new(settings(300, layout, 1)).unwrap();
		let mut double = Store::<f64>::new(settings(300, layout, 1)).unwrap();
		for _ in 0..100 {
			scheduler.step(&mut single);
			scheduler.step(&mut double);
		}
		assert!(single.positions().all(|[x, y]| x.is_finite() && y.is_finite()));
		assert!(double.positions().all(|[x, y]| x.is_finite() && y.is_finite()));
	}
}

#[test]
fn single_precision_is_deterministic() {
	let run = || {
		let mut store = Store::<f32>::new(settings(128, Layout::Soa, 77)).unwrap();
		for _ in 0..20 {
			store.step();
		}
		store.positions_snapshot()
	};
	assert_eq!(run(), run());
}

#[test]
fn layouts_agree() {
	let mut aos = Store::<f64>::new(settings(200, Layout::Aos, 3)).unwrap();
	let mut soa = Store::<f64>::new(settings(200, Layout::Soa, 3)).unwrap();
	assert_eq!(aos.positions_snapshot(), soa.positions_snapshot());
	for _ in 0..10 {
		aos.step();
		soa.step();
	}
	assert_close(&aos.positions_snapshot(), &soa.positions_snapshot(), 1e-12);
}

#[test]
fn parallel_matches_serial() {
	for workers in [1, 2, 5, 16] {
		let mut scheduler = Scheduler::new(workers).unwrap();
		let mut serial = Store::<f32>::new(settings(257, Layout::Aos, 11)).unwrap();
		let mut parallel = serial.clone();
		for _ in 0..10 {
			serial.step();
			scheduler.step(&mut parallel);
		}
		assert_close(&serial.positions_snapshot(), &parallel.positions_snapshot(), 1e-5);
	}
}

#[test]
fn reset_then_quit() {
	let sim = Simulation::new(settings::<f32>(64, Layout::Soa, 20), Executor::new(Some(2)).unwrap())
		.unwrap();
	let initial = sim.store().positions_snapshot();
	let mut frame = 0;
	let mut after_reset = None;
	let exit = sim.run(&mut |store: &Store<f32>| {
		frame += 1;
		match frame {
			5 => Control::Reset,
			6 => {
				assert_eq!(store.settings().seed, 21);
				after_reset = Some(store.positions_snapshot());
				Control::Continue
			}
			10 => Control::Quit,
			_ => Control::Continue,
		}
	});
	assert_eq!(exit.steps, 8);
	assert_eq!(exit.resets, 1);
	let after_reset = after_reset.unwrap();
	assert_eq!(after_reset.len(), 64);
	assert_ne!(after_reset, initial);
	assert!(after_reset
		.iter()
		.all(|&[x, y]| (0.0..1366.0).contains(&x) && (0.0..768.0).contains(&y)));
}
