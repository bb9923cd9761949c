const NUM_GAMES: usize = 64;
const MAX_GAME_PLIES: u32 = 300;
const CONFIG_FILE_PATH: &str = "data/encoder_config.bin";
const OUTPUT_FILE_PATH: &str = "data/random_self_play.bin";

use std::fs;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, warn};
use chess_tensor::encoding::{write_samples, ChessTensor, CodecError, EncoderConfig, TrainingSample};
use chess_tensor::utils::Color;

/// Plays one game of uniformly random moves. Every position gets the move played as its policy
/// target and the final result, seen from its side to move, as its value target.
fn play_random_game(rng: &mut StdRng, config: EncoderConfig) -> Result<Vec<TrainingSample>, CodecError> {
    let mut chess_tensor = ChessTensor::new(config);
    let mut pending: Vec<(TrainingSample, Color)> = Vec::new();

    while chess_tensor.outcome().is_none() && chess_tensor.position().ply < MAX_GAME_PLIES {
        let moves = chess_tensor.get_moves();
        let mv = match moves.choose(rng) {
            Some(mv) => *mv,
            None => break,
        };
        let sample = TrainingSample::new(&chess_tensor, &[(mv, 1.)], 0.)?;
        pending.push((sample, chess_tensor.side_to_move()));
        chess_tensor.move_piece(mv)?;
    }

    let outcome = chess_tensor.outcome();
    info!(plies = chess_tensor.position().ply, ?outcome, "finished game");

    Ok(pending
        .into_iter()
        .map(|(mut sample, color)| {
            sample.value = outcome.map_or(0., |outcome| outcome.value_for(color)) as f32;
            sample
        })
        .collect())
}

fn main() {
    tracing_subscriber::fmt::init();

    let config = match EncoderConfig::load(CONFIG_FILE_PATH) {
        Ok(config) => config,
        Err(e) => {
            warn!("Using the default encoder config: {}", e);
            EncoderConfig::default()
        }
    };

    let seed = std::env::args().nth(1).and_then(|arg| arg.parse().ok()).unwrap_or(0);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut samples = Vec::new();
    for game_index in 0..NUM_GAMES {
        let game_samples = play_random_game(&mut rng, config).unwrap();
        info!(game_index, num_samples = game_samples.len(), "collected samples");
        samples.extend(game_samples);
    }

    fs::create_dir_all("data").unwrap();
    write_samples(OUTPUT_FILE_PATH, &samples).unwrap();
    info!("Wrote {} samples to {}", samples.len(), OUTPUT_FILE_PATH);
}
