use keep_dice::Expression;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::convert::TryFrom;

/// Histogram of simulated totals. The first entry is the smallest possible total, followed
/// by one counter per total from the minimum to the maximum.
fn histogram(expression: &Expression, totals: &[i64]) -> Vec<i64> {
    let (result_min, result_max) = (expression.get_min(), expression.get_max());
    let mut results: Vec<i64> = vec![0; usize::try_from(result_max - result_min + 2).unwrap_or(1)];
    results[0] = result_min;
    for total in totals {
        if let Some(slot) = usize::try_from(total - result_min + 1)
            .ok()
            .and_then(|index| results.get_mut(index))
        {
            *slot += 1;
        }
    }
    results
}

fn simulate(expression: &Expression, num: u32, master_rng: &mut ChaCha20Rng) -> Vec<i64> {
    (0..num)
        .map(|_| {
            let mut seed: <Xoshiro256PlusPlus as SeedableRng>::Seed = Default::default();
            master_rng.fill(&mut seed);
            Xoshiro256PlusPlus::from_seed(seed)
        })
        .map(|mut rng| expression.roll(&mut rng))
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let (expression, num) = {
        let mut args = std::env::args().skip(1);
        let expression: Expression = args
            .next()
            .ok_or("first arg should be a dice expression")?
            .parse()?;
        (
            expression,
            args.next().and_then(|a| a.parse::<u32>().ok()).unwrap_or(1),
        )
    };
    log::info!("simulating {} rolls of {}", num, &expression);

    let mut master_rng = ChaCha20Rng::from_entropy();
    let totals = simulate(&expression, num, &mut master_rng);

    let mean = totals.iter().sum::<i64>() as f64 / f64::from(num.max(1));
    let ev = expression.get_ev();
    println!("expression: {}", expression);
    println!("range:      {} ..= {}", expression.get_min(), expression.get_max());
    println!("analytic:   {:.4}", ev);
    println!("simulated:  {:.4} over {} rolls", mean, num);
    if ev != 0.0 {
        println!("deviation:  {:+.3}%", (mean - ev) / ev.abs() * 100.0);
    }

    npy::to_file("rolls.npy", histogram(&expression, &totals))?;
    log::info!("histogram written to rolls.npy");
    Ok(())
}
