//! War Table CLI - plays one game and saves the final board
//!
//! Usage: `war-table [settings.json]`

use std::process::ExitCode;

use war_table::config::Settings;
use war_table::scene::{Facet, SceneController, ScenePhase};

fn main() -> ExitCode {
    println!("War Table");
    println!("=========");
    println!();

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::from_json_file(&path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Could not load {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    let mut scene = match SceneController::from_settings(&settings) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Could not set up the table: {}", e);
            return ExitCode::FAILURE;
        }
    };

    scene.subscribe(Facet::Outcome, |_, snapshot| {
        if snapshot.game_over {
            let [p1, p2] = &snapshot.players;
            println!(
                "Final outcome: {:?} ({} {} cards, {} {} cards)",
                snapshot.outcome,
                p1.name,
                p1.cards.len(),
                p2.name,
                p2.cards.len()
            );
        }
    });

    if let Err(e) = scene.start_game() {
        eprintln!("Could not start the game: {}", e);
        scene.end_session();
        return ExitCode::FAILURE;
    }

    let mut wars = 0;
    while scene.phase() != ScenePhase::GameOver {
        match scene.play_round() {
            Ok(report) => wars += report.round.wars,
            Err(e) => {
                eprintln!("Round failed: {}", e);
                break;
            }
        }
    }

    println!("Rounds played: {}", scene.state().rounds);
    println!("Wars fought: {}", wars);

    let status = match scene.save_board(&settings.output_path) {
        Ok(()) => {
            println!("Board saved to {}", settings.output_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Could not save board: {}", e);
            ExitCode::FAILURE
        }
    };

    scene.end_session();
    status
}
