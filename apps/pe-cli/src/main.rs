use clap::{Parser, Subcommand};
use pe_project::{
    EngineReport, Project, ProjectError, ProjectResult, SweepPoint, ValidationError,
    build_catalog, run_engine, sweep_area_ratio,
};
use pe_properties::MixtureCatalog;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pe-cli")]
#[command(about = "ProcEngine CLI - Liquid rocket engine performance calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// List engines in a project
    Engines {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Evaluate engines of a project
    Run {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Engine ID to evaluate (all engines when omitted)
        #[arg(long)]
        engine: Option<String>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sweep the nozzle area ratio of one engine
    Sweep {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Engine ID to sweep
        #[arg(long)]
        engine: String,
        /// First area ratio
        #[arg(long)]
        from: f64,
        /// Last area ratio
        #[arg(long)]
        to: f64,
        /// Number of points
        #[arg(long, default_value_t = 10)]
        steps: usize,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// List known propellant mixtures
    Mixtures {
        /// Include custom mixtures from this project
        #[arg(long)]
        project: Option<PathBuf>,
    },
}

fn main() -> ProjectResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Engines { project_path } => cmd_engines(&project_path),
        Commands::Run {
            project_path,
            engine,
            json,
        } => cmd_run(&project_path, engine.as_deref(), json),
        Commands::Sweep {
            project_path,
            engine,
            from,
            to,
            steps,
            json,
        } => cmd_sweep(&project_path, &engine, from, to, steps, json),
        Commands::Mixtures { project } => cmd_mixtures(project.as_deref()),
    }
}

fn load_project(path: &Path) -> ProjectResult<Project> {
    tracing::info!(path = %path.display(), "loading project");
    pe_project::load(path)
}

fn cmd_validate(project_path: &Path) -> ProjectResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = load_project(project_path)?;
    println!(
        "✓ Project is valid ({} engines, {} custom mixtures)",
        project.engines.len(),
        project.mixtures.len()
    );
    Ok(())
}

fn cmd_engines(project_path: &Path) -> ProjectResult<()> {
    let project = load_project(project_path)?;

    if project.engines.is_empty() {
        println!("No engines found in project");
    } else {
        println!("Engines in project:");
        for engine in &project.engines {
            let cycle = pe_project::power_cycle(&engine.cycle);
            println!(
                "  {} - {} ({}, {}, {:.2} MPa, area ratio {:.1})",
                engine.id,
                engine.display_name(),
                engine.mixture,
                cycle.calculator_type(),
                engine.chamber_pressure_mpa,
                engine.area_ratio
            );
        }
    }
    Ok(())
}

fn cmd_run(project_path: &Path, engine_id: Option<&str>, json: bool) -> ProjectResult<()> {
    let project = load_project(project_path)?;
    let catalog = build_catalog(&project)?;

    let engines: Vec<_> = match engine_id {
        Some(id) => vec![find_engine(&project, id)?],
        None => project.engines.iter().collect(),
    };

    let mut reports = Vec::with_capacity(engines.len());
    for engine in engines {
        reports.push(run_engine(engine, &catalog)?);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }
    Ok(())
}

fn cmd_sweep(
    project_path: &Path,
    engine_id: &str,
    from: f64,
    to: f64,
    steps: usize,
    json: bool,
) -> ProjectResult<()> {
    let project = load_project(project_path)?;
    let catalog = build_catalog(&project)?;
    let engine = find_engine(&project, engine_id)?;
    let points = sweep_area_ratio(engine, &catalog, from, to, steps)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&points)?);
    } else {
        print_sweep(engine_id, &points);
    }
    Ok(())
}

fn cmd_mixtures(project_path: Option<&Path>) -> ProjectResult<()> {
    let catalog = match project_path {
        Some(path) => build_catalog(&load_project(path)?)?,
        None => MixtureCatalog::builtin(),
    };

    println!("Known mixtures:");
    for def in catalog.entries() {
        let aliases = if def.aliases.is_empty() {
            String::new()
        } else {
            format!(" [{}]", def.aliases.join(", "))
        };
        println!(
            "  {}{} - {}/{}, O/F {:.2}..{:.2} (nominal {:.2}), {:.2}..{:.1} MPa",
            def.name,
            aliases,
            def.oxidizer,
            def.fuel,
            def.of_lean,
            def.of_rich,
            def.nominal_of,
            def.chamber_pressure_low_mpa,
            def.chamber_pressure_high_mpa
        );
    }
    Ok(())
}

fn find_engine<'a>(
    project: &'a Project,
    id: &str,
) -> ProjectResult<&'a pe_project::EngineDef> {
    project.engine(id).ok_or_else(|| {
        ProjectError::Validation(ValidationError::MissingReference {
            id: id.to_string(),
            context: "engines".to_string(),
        })
    })
}

fn print_report(report: &EngineReport) {
    println!("Engine {} ({}, {})", report.id, report.calculator, report.mixture);
    println!(
        "  Chamber:    O/F {:.3} (overall {:.3}), {:.2} MPa, {:.0} K",
        report.of_ratio,
        report.overall_of_ratio,
        report.chamber_pressure_mpa,
        report.chamber_temperature_k
    );
    println!(
        "  Nozzle:     area ratio {:.1}, throat {:.4} m, exit {:.4} m",
        report.area_ratio, report.throat_diameter_m, report.nozzle_diameter_m
    );
    println!(
        "  Mass flow:  chamber {:.3} kg/s, total {:.3} kg/s",
        report.chamber_mass_flow_kg_s, report.total_mass_flow_kg_s
    );
    println!(
        "  Thrust:     vac {:.2} kN, SL {:.2} kN, min vac {:.2} kN (throttle {:.2})",
        report.thrust_vacuum_n / 1000.0,
        report.thrust_sea_level_n / 1000.0,
        report.min_thrust_vacuum_n / 1000.0,
        report.min_throttle
    );
    println!(
        "  Isp:        vac {:.1} s, SL {:.1} s",
        report.isp_vacuum_s, report.isp_sea_level_s
    );
    println!(
        "  Exit:       M {:.3}, {:.4} MPa, {:.0} K, {:.0} m/s",
        report.exit_mach,
        report.exit_pressure_mpa,
        report.exit_temperature_k,
        report.exhaust_velocity_m_s
    );
    if let Some(turbine) = &report.turbine {
        println!(
            "  Turbine:    {:.3} kg/s, {:.1} kW, PR {:.1}, GG O/F {:.2}",
            turbine.mass_flow_kg_s,
            turbine.power_kw,
            turbine.pressure_ratio,
            turbine.gas_generator_of_ratio
        );
        println!(
            "  Pumps:      ox +{:.2} MPa {:.1} kW, fuel +{:.2} MPa {:.1} kW",
            turbine.oxidizer_pump_rise_mpa,
            turbine.oxidizer_pump_power_kw,
            turbine.fuel_pump_rise_mpa,
            turbine.fuel_pump_power_kw
        );
    }
    let g = &report.geometry;
    println!(
        "  Structure:  {} chamber {:.3} m x {:.3} m, {:.1} kg; nozzle {:.1} kg",
        g.material, g.chamber_diameter_m, g.chamber_length_m, g.chamber_mass_kg, g.nozzle_mass_kg
    );
    for clamp in &report.clamps {
        println!(
            "  Note: {} clamped from {} to {}",
            clamp.field, clamp.requested, clamp.applied
        );
    }
}

fn print_sweep(engine_id: &str, points: &[SweepPoint]) {
    println!("Area ratio sweep for engine {}", engine_id);
    println!(
        "{:>10} {:>14} {:>14} {:>10} {:>10} {:>12}",
        "AR", "F_vac [kN]", "F_SL [kN]", "Isp_vac", "Isp_SL", "p_exit [MPa]"
    );
    for p in points {
        println!(
            "{:>10.2} {:>14.2} {:>14.2} {:>10.1} {:>10.1} {:>12.5}",
            p.area_ratio,
            p.thrust_vacuum_n / 1000.0,
            p.thrust_sea_level_n / 1000.0,
            p.isp_vacuum_s,
            p.isp_sea_level_s,
            p.exit_pressure_mpa
        );
    }
}
