use broadside::{
    GameConfig, GameSession, Player, RandomAgent, TargetingStrategy, BOARD_SIZE,
};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

struct Outcome {
    winner: Option<Player>,
    human_shots: usize,
    agent_shots: usize,
}

/// Play one game: a uniform random shooter in the human slot against the
/// session's hunt/target agent.
fn play_one(seed: u64) -> anyhow::Result<Outcome> {
    let mut session = GameSession::new(GameConfig::new().with_seed(seed));
    session.place_random(Player::Human)?;
    session.place_random(Player::Agent)?;

    let mut shooter = RandomAgent::new();
    shooter.reset(BOARD_SIZE);
    let mut rng = SmallRng::seed_from_u64(seed ^ 0x5eed_5eed_5eed_5eed);

    while !session.is_over() {
        let target = shooter
            .choose_target(&mut rng, session.board(Player::Agent))
            .ok_or_else(|| anyhow::anyhow!("no target left for the human side"))?;
        session.fire(Player::Human, target.x, target.y)?;
    }

    Ok(Outcome {
        winner: session.winner(),
        human_shots: session.shots_fired(Player::Human),
        agent_shots: session.shots_fired(Player::Agent),
    })
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <games> <seed>", args[0]);
        std::process::exit(1);
    }
    let games: u64 = args[1].parse()?;
    let seed: u64 = args[2].parse()?;

    let mut agent_wins = 0u64;
    let mut human_wins = 0u64;
    let mut agent_win_shots = Vec::new();
    let mut human_win_shots = Vec::new();

    for i in 0..games {
        let outcome = play_one(seed.wrapping_add(i))?;
        match outcome.winner {
            Some(Player::Agent) => {
                agent_wins += 1;
                agent_win_shots.push(outcome.agent_shots);
            }
            Some(Player::Human) => {
                human_wins += 1;
                human_win_shots.push(outcome.human_shots);
            }
            None => {}
        }
    }

    let average = |shots: &[usize]| {
        if shots.is_empty() {
            None
        } else {
            Some(shots.iter().sum::<usize>() as f64 / shots.len() as f64)
        }
    };

    let result = json!({
        "games": games,
        "seed": seed,
        "agent": {
            "wins": agent_wins,
            "avg_shots_to_win": average(&agent_win_shots),
            "min_shots_to_win": agent_win_shots.iter().min(),
        },
        "random": {
            "wins": human_wins,
            "avg_shots_to_win": average(&human_win_shots),
        },
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
