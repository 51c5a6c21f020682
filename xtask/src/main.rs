//! Build automation tasks for the matrix clock.
//!
//! Run with: `cargo xtask <command>`

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::{Command, ExitCode};

const FIRMWARE_TARGET: &str = "thumbv6m-none-eabi";
const FIRMWARE_FEATURES: &str = "pico1,arm";
const FIRMWARE_BIN: &str = "matrix_clock";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for the matrix clock", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: build lib and firmware, run host tests, generate docs
    CheckAll,
    /// Build the clock firmware
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run the host tests (no hardware needed)
    Test,
    /// Build UF2 firmware file for flashing to the Pico
    Uf2,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckAll => check_all(),
        Commands::Build { release } => exit_code(build_firmware(release)),
        Commands::Test => exit_code(host_tests()),
        Commands::Uf2 => build_uf2(),
    }
}

fn check_all() -> ExitCode {
    let workspace_root = workspace_root();

    println!("{}", "==> Building library...".cyan());
    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "build",
        "--lib",
        "--target",
        FIRMWARE_TARGET,
        "--features",
        FIRMWARE_FEATURES,
    ])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Building firmware...".cyan());
    if !build_firmware(false) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Running host tests...".cyan());
    if !host_tests() {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Building documentation...".cyan());
    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "doc",
        "--target",
        FIRMWARE_TARGET,
        "--no-deps",
        "--features",
        FIRMWARE_FEATURES,
    ])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> All checks passed!".green().bold());
    ExitCode::SUCCESS
}

fn build_firmware(release: bool) -> bool {
    let mut cmd = Command::new("cargo");
    cmd.current_dir(workspace_root()).args([
        "build",
        "--bin",
        FIRMWARE_BIN,
        "--target",
        FIRMWARE_TARGET,
        "--features",
        FIRMWARE_FEATURES,
    ]);
    if release {
        cmd.arg("--release");
    }

    let built = run_command(&mut cmd);
    if built {
        println!("{}", "Build successful!".green());
    }
    built
}

fn host_tests() -> bool {
    let mut cmd = Command::new("cargo");
    cmd.current_dir(workspace_root()).arg("test");

    match host_target() {
        Some(target) => {
            println!(
                "  {}",
                format!("Using host target: {target}").bright_black()
            );
            cmd.arg("--target").arg(target);
        }
        None => {
            println!(
                "{}",
                "  Unable to detect host target; relying on cargo default.".bright_black()
            );
        }
    }

    cmd.args(["--no-default-features", "--features", "host"]);
    run_command(&mut cmd)
}

fn build_uf2() -> ExitCode {
    let workspace_root = workspace_root();

    println!("{}", "Building UF2 for the clock firmware".cyan());
    println!("  Features: {}", FIRMWARE_FEATURES.bright_black());
    println!("  Target: {}", FIRMWARE_TARGET.bright_black());

    if !build_firmware(true) {
        return ExitCode::FAILURE;
    }

    let elf_path = format!("target/{FIRMWARE_TARGET}/release/{FIRMWARE_BIN}");
    let uf2_path = format!("{FIRMWARE_BIN}.uf2");

    println!("\n{}", "Converting to UF2 format...".cyan());

    if run_command(
        Command::new("elf2uf2-rs")
            .current_dir(&workspace_root)
            .args([&elf_path, &uf2_path]),
    ) {
        println!("{}", format!("UF2 created: {uf2_path}").green().bold());
        println!("{}", "Ready to drag-and-drop to your Pico!".bright_black());
        ExitCode::SUCCESS
    } else {
        println!(
            "{}",
            "Note: Install elf2uf2-rs with: cargo install elf2uf2-rs".yellow()
        );
        ExitCode::FAILURE
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn workspace_root() -> std::path::PathBuf {
    std::env::current_dir().expect("Failed to get current directory")
}

fn host_target() -> Option<String> {
    let output = Command::new("rustc").arg("-vV").output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("host: "))
        .map(|host| host.trim().to_string())
}

fn run_command(cmd: &mut Command) -> bool {
    match cmd.status() {
        Ok(status) => status.success(),
        Err(e) => {
            eprintln!("{}", format!("Failed to execute command: {e}").red());
            false
        }
    }
}
