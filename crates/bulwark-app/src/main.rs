//! BULWARK command-line runner.
//!
//! Two built-in demo scenarios, one per engine family. Scenario
//! values live here in the binary; the engine crates never read
//! files.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bulwark_core::SimTime;
use bulwark_intel::analyzer::ImageryAnalyzer;
use bulwark_intel::config::{AnalyzerConfig, EoConfig, SarConfig};
use bulwark_intel::engine::{HuntConfig, HuntEngine};
use bulwark_intel::intelligence::{Channel, Intelligence};
use bulwark_intel::observation::TargetId;
use bulwark_intel::observer::{EoObserver, SarObserver};
use bulwark_intel::tracker::PerfectTracker;
use bulwark_intel::world::{Base, HuntWorld, Tlo};
use bulwark_sim::engine::{DuelConfig, DuelEngine, EngagementTuning};
use bulwark_sim::events::EventKind;
use bulwark_sim::salvo;
use bulwark_sim::scenario::{build_launcher, build_site, BatterySpec, LauncherSpec, SiteSpec};
use bulwark_sim::snapshot::build_snapshot;

#[derive(Parser)]
#[command(name = "bulwark", version, about = "Adversarial engagement simulations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Missile-versus-interceptor duel over a defended site.
    Duel {
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Stop executing events scheduled after this time.
        #[arg(long)]
        horizon_secs: Option<u64>,
    },
    /// Mobile-launcher hunt: sensors, analysis pipeline, dossiers.
    Hunt {
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = bulwark_core::constants::DAY)]
        horizon_secs: u64,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Duel { seed, horizon_secs } => run_duel(seed, horizon_secs),
        Commands::Hunt { seed, horizon_secs } => run_hunt(seed, horizon_secs),
    }
}

fn run_duel(seed: u64, horizon_secs: Option<u64>) {
    let mut engine = DuelEngine::new(DuelConfig {
        seed,
        horizon: horizon_secs.map(SimTime::from_secs),
        tuning: EngagementTuning::default(),
    });

    let site = match build_site(engine.world_mut(), &demo_site()) {
        Ok(site) => site,
        Err(e) => {
            eprintln!("demo site spec invalid: {e}");
            std::process::exit(1);
        }
    };
    let mut launchers = Vec::new();
    for spec in demo_launchers() {
        match build_launcher(engine.world_mut(), &spec) {
            Ok(launcher) => launchers.push(launcher),
            Err(e) => {
                eprintln!("demo launcher spec invalid: {e}");
                std::process::exit(1);
            }
        }
    }

    // Opening salvo now, a second wave twenty minutes in.
    let ready = salvo::ready_launchers(engine.world(), None);
    if let Err(e) = engine.plan_salvo(SimTime::ZERO, &ready, &[site, site, site]) {
        eprintln!("salvo planning failed: {e}");
        std::process::exit(1);
    }
    for &launcher in &launchers {
        if let Err(e) = engine.schedule(
            SimTime::from_mins(20),
            EventKind::LaunchMissile { launcher, target: site },
        ) {
            eprintln!("scheduling failed: {e}");
            std::process::exit(1);
        }
    }

    info!("duel scenario: 1 site, {} launchers, seed {seed}", launchers.len());
    engine.run();

    let snapshot = build_snapshot(engine.world(), engine.now());
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("snapshot serialization failed: {e}"),
    }
    info!(
        "duel finished at {}: {} intercepted, {} impacted, {} engagement records",
        engine.now(),
        snapshot.missiles.intercepted,
        snapshot.missiles.impacted,
        engine.log().len()
    );
}

fn run_hunt(seed: u64, horizon_secs: u64) {
    let world = demo_hunt_world();
    let channels = vec![
        Channel {
            observer: Box::new(EoObserver::new(EoConfig::default())),
            analyzer: ImageryAnalyzer::new(AnalyzerConfig::default()),
        },
        Channel {
            observer: Box::new(SarObserver::new(SarConfig::default())),
            analyzer: ImageryAnalyzer::new(AnalyzerConfig::default()),
        },
    ];
    let intelligence = Intelligence::new(channels, Box::new(PerfectTracker::default()), &world);

    let mut engine = match HuntEngine::new(
        world,
        intelligence,
        HuntConfig {
            seed,
            horizon: SimTime::from_secs(horizon_secs),
            ..HuntConfig::default()
        },
    ) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("hunt setup failed: {e}");
            std::process::exit(1);
        }
    };

    info!(
        "hunt scenario: {} bases, {} TELs, seed {seed}",
        engine.world().bases.len(),
        engine.world().tel_count()
    );
    engine.run();

    engine.intelligence().report(engine.now());
    let stats = engine.intelligence().detection_stats();
    println!(
        "detected {}/{} TELs ({:.0}%)",
        stats.tels_detected,
        stats.tels_total,
        stats.detected_fraction * 100.0
    );
    match engine.intelligence().mean_observations_per_detected_tel() {
        Ok(mean) => println!("mean observations per detected TEL: {mean:.1}"),
        Err(_) => println!("no TEL detected within the horizon"),
    }
}

fn demo_site() -> SiteSpec {
    SiteSpec {
        name: "anderson".to_string(),
        lat: 13.58,
        lon: 144.93,
        cruise_points: 1,
        ballistic_points: 2,
        destroy_threshold: 6,
        radar_range_km: Some(bulwark_core::constants::CUE_RADIUS_KM),
        batteries: vec![
            BatterySpec {
                name: "anderson_upper".to_string(),
                engages: "ballistic".to_string(),
                speed_kms: 2.0,
                max_range_km: 200.0,
                capacity: 24,
                reload_secs: 1800,
                reloads: 1,
            },
            BatterySpec {
                name: "anderson_point".to_string(),
                engages: "any".to_string(),
                speed_kms: 1.7,
                max_range_km: 160.0,
                capacity: 32,
                reload_secs: 900,
                reloads: 2,
            },
        ],
    }
}

fn demo_launchers() -> Vec<LauncherSpec> {
    vec![
        LauncherSpec {
            name: "red_ballistic_1".to_string(),
            lat: 25.0,
            lon: 119.0,
            kind: "ballistic".to_string(),
            missile_speed_kms: 3.0,
            reload_secs: 600,
            reloads: 2,
        },
        LauncherSpec {
            name: "red_ballistic_2".to_string(),
            lat: 26.1,
            lon: 119.5,
            kind: "ballistic".to_string(),
            missile_speed_kms: 3.0,
            reload_secs: 600,
            reloads: 2,
        },
        LauncherSpec {
            name: "red_cruise_1".to_string(),
            lat: 24.5,
            lon: 118.2,
            kind: "cruise".to_string(),
            missile_speed_kms: 0.25,
            reload_secs: 900,
            reloads: 1,
        },
    ]
}

fn demo_hunt_world() -> HuntWorld {
    HuntWorld::new(vec![
        Base::new(
            "jilantai",
            bulwark_core::Location::new(39.75, 105.65),
            vec![
                Tlo::tel(TargetId(1)),
                Tlo::tel(TargetId(2)),
                Tlo::decoy(TargetId(101)),
                Tlo::trucks(120_000),
            ],
        ),
        Base::new(
            "delingha",
            bulwark_core::Location::new(37.37, 97.37),
            vec![
                Tlo::tel(TargetId(3)),
                Tlo::trucks(60_000),
            ],
        ),
    ])
}
