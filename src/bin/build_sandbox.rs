//! Build Sandbox - headless placement session
//!
//! Scripts a short building session against flat terrain and prints the
//! resulting structure as JSON. Useful for checking tuning changes without
//! a renderer.
//!
//! Run with: `cargo run --bin build_sandbox [config.json]`
//!
//! Set `SANDBOX_LOG=debug` for candidate-level logging.

use std::f32::consts::FRAC_PI_2;
use std::path::Path;

use glam::Vec3;
use log::{LevelFilter, Log, Metadata, Record};

use fort_builder_engine::game::{
    BuildConfig, BuildingSystem, ComponentKind, PartId, RejectReason, ResourceType, Resources,
};
use fort_builder_engine::world::FlatTerrain;

/// Prints log records to stdout.
struct StdoutLogger;

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{:<5} {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StdoutLogger = StdoutLogger;

fn init_logging() {
    let level = match std::env::var("SANDBOX_LOG").as_deref() {
        Ok("debug") => LevelFilter::Debug,
        Ok("warn") => LevelFilter::Warn,
        _ => LevelFilter::Info,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn place(
    building: &mut BuildingSystem,
    terrain: &FlatTerrain,
    ledger: &mut Resources,
    kind: ComponentKind,
    hit: Vec3,
    yaw: f32,
) -> Result<PartId, RejectReason> {
    building.begin_placement_session(kind);
    let candidate = building.update_candidate(hit, Vec3::Y, yaw, terrain, &*ledger)?;
    println!(
        "  {} at ({:.2}, {:.2}, {:.2}) -> {}",
        kind.display_name(),
        candidate.transform.position.x,
        candidate.transform.position.y,
        candidate.transform.position.z,
        match candidate.verdict {
            Ok(()) => "ok".to_string(),
            Err(reason) => reason.message(),
        }
    );
    let result = building.confirm_placement(terrain, ledger);
    building.end_placement_session();
    result
}

fn main() {
    init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => BuildConfig::load_or_default(Path::new(&path)),
        None => BuildConfig::default(),
    };

    let terrain = FlatTerrain::new(5.0, 2.0);
    let mut ledger = Resources::new();
    let mut building = BuildingSystem::new(config);

    println!("=== Fort Builder Sandbox ===");
    println!("Grid: {}m, water at {}m, ground at {}m", building.config().grid_size, terrain.water_level, terrain.height);

    println!("Placing:");
    let foundation = place(&mut building, &terrain, &mut ledger, ComponentKind::Foundation, Vec3::new(1.2, 5.0, -0.9), 0.0);
    let wall = place(&mut building, &terrain, &mut ledger, ComponentKind::Wall, Vec3::new(4.0, 5.0, 0.0), FRAC_PI_2);
    let second_wall = place(&mut building, &terrain, &mut ledger, ComponentKind::Wall, Vec3::new(2.0, 7.0, 4.5), FRAC_PI_2);
    let far_wall = place(&mut building, &terrain, &mut ledger, ComponentKind::Wall, Vec3::new(50.0, 5.0, 50.0), 0.0);
    for (label, result) in [
        ("foundation", &foundation),
        ("wall", &wall),
        ("second wall", &second_wall),
        ("far wall", &far_wall),
    ] {
        match result {
            Ok(id) => println!("  {} placed as part {}", label, id),
            Err(reason) => println!("  {} not placed: {}", label, reason),
        }
    }

    if wall.is_ok()
        && let Ok(foundation) = foundation
    {
        let snapshot = building.snapshot();
        match building.remove_part(foundation) {
            Ok(report) => println!(
                "Removed foundation {}: {} parts came down ({:?})",
                foundation,
                report.total(),
                report.removed_ids()
            ),
            Err(reason) => println!("Removal failed: {}", reason),
        }

        if let Err(err) = building.restore(&snapshot) {
            eprintln!("Restore failed: {}", err);
            std::process::exit(1);
        }
    }

    println!("Resources left:");
    for resource in ResourceType::ALL {
        println!("  {} {}: {}", resource.icon(), resource.name(), ledger.get(resource));
    }

    match building.snapshot().to_json() {
        Ok(json) => println!("{}", json),
        Err(err) => {
            eprintln!("Snapshot failed: {}", err);
            std::process::exit(1);
        }
    }
}
