//! Aperture Profile Demo
//!
//! Drives the profile screen controller from the terminal:
//! - Mount with entrance transition and stored-avatar load
//! - Capture surface open/close against a simulated camera
//! - Shutter presses with random or scripted-failure payloads
//! - Avatar persistence in a file slot that survives restarts

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use aperture_access::{PermissionGate, SimPermissions};
use aperture_capture::{Shot, SimCamera};
use aperture_profile::{Profile, ProfileController};
use aperture_store::{FileSlot, ImageStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let deny = std::env::args().any(|arg| arg == "--deny");

    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║           Aperture Profile Demo - Avatar Capture           ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!();

    let data_dir = std::env::temp_dir().join("aperture-profile-demo");
    println!("Avatar slot directory: {}", data_dir.display());
    if deny {
        println!("Camera permission will be denied (--deny).");
    }
    println!();

    let camera = SimCamera::new();
    let permissions = if deny {
        SimPermissions::denying()
    } else {
        SimPermissions::granting()
    };
    let gate = Arc::new(PermissionGate::new(Arc::new(permissions)));
    let store = Arc::new(ImageStore::new(Arc::new(FileSlot::new(&data_dir))));

    let mut controller =
        ProfileController::new(Profile::sample(), gate, store, Arc::new(camera.clone()));

    println!("Mounting profile screen...");
    controller.mount().await;
    print_view(&controller);

    println!();
    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║  Commands:                                                 ║");
    println!("║    /open     - Open the capture surface                    ║");
    println!("║    /close    - Close the capture surface                   ║");
    println!("║    /shot     - Press the shutter                           ║");
    println!("║    /fail     - Press the shutter on a failing shot         ║");
    println!("║    /show     - Show view state and counters                ║");
    println!("║    /profile  - Show profile fields                         ║");
    println!("║    /quit     - Exit                                        ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!();

    print!("> ");
    io::stdout().flush()?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "/quit" | "quit" => break,
            "/open" => controller.set_camera_open(true).await,
            "/close" => controller.set_camera_open(false).await,
            "/shot" => controller.press_shutter(),
            "/fail" => {
                camera.push_shot(Shot::fail("simulated capture failure"));
                controller.press_shutter();
            }
            "/show" => print_view(&controller),
            "/profile" => print_profile(controller.profile()),
            "" => {}
            other => println!("Unknown command: {}", other),
        }

        // Let acquisition and capture completions land before prompting.
        controller
            .process_events_for(Duration::from_millis(100))
            .await;

        println!("{}", status_line(&controller));
        print!("> ");
        io::stdout().flush()?;
    }

    println!("Goodbye!");
    Ok(())
}

fn status_line(controller: &ProfileController) -> String {
    let view = controller.view();
    format!(
        "camera {} | busy {} | permission {} | avatar {}",
        if view.camera_open { "open" } else { "closed" },
        view.capture_busy,
        view.permission,
        summarize(controller.avatar_uri()),
    )
}

fn print_view(controller: &ProfileController) {
    let view = controller.view();
    let stats = controller.stats();
    println!("  loading:      {}", view.loading);
    println!("  permission:   {}", view.permission);
    if let Some(notice) = view.access_notice() {
        println!("  notice:       {}", notice);
    }
    println!("  camera open:  {}", view.camera_open);
    println!("  capture busy: {}", view.capture_busy);
    println!("  avatar:       {}", summarize(controller.avatar_uri()));
    if let Some(alert) = &view.alert {
        println!("  alert:        {}", alert);
    }
    println!(
        "  sessions: {}  captures: {} ok / {} failed  stale: {}",
        stats.sessions_opened,
        stats.captures_succeeded,
        stats.captures_failed,
        stats.stale_results_discarded,
    );
}

fn print_profile(profile: &Profile) {
    println!("  name:      {}", profile.name);
    println!("  email:     {}", profile.email);
    println!("  phone:     {}", profile.phone);
    println!("  birthday:  {}", profile.birthday);
    println!("  linkedin:  {}", profile.linkedin);
    println!("  github:    {}", profile.github);
    println!("  languages: {}", profile.languages.join(", "));
}

fn summarize(uri: &str) -> String {
    if uri.len() > 56 {
        let head: String = uri.chars().take(56).collect();
        format!("{}... ({} chars)", head, uri.len())
    } else {
        uri.to_string()
    }
}
