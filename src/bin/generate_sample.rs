use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let regions = ["North", "South", "East", "West"];
    let products = [("Widget", 19.99), ("Gadget", 34.50), ("Gizmo", 7.25)];
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("invalid start date")?;

    let output_path = "sample_sales.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["order_id", "OrderDate", "region", "product", "units", "revenue"])?;

    let n_orders = 240;
    for order_id in 1..=n_orders {
        let day = start + Duration::days(rng.below(180) as i64);
        // A few malformed dates so the null-last sort is visible.
        let date = if order_id % 37 == 0 {
            "unknown".to_string()
        } else {
            day.format("%Y-%m-%d").to_string()
        };
        let region = regions[rng.below(regions.len())];
        let (product, price) = products[rng.below(products.len())];
        let units = 1 + rng.below(12);
        let revenue = units as f64 * price;

        writer.write_record([
            order_id.to_string(),
            date,
            region.to_string(),
            product.to_string(),
            units.to_string(),
            format!("{revenue:.2}"),
        ])?;
    }
    writer.flush().context("flushing CSV writer")?;

    println!("Wrote {n_orders} orders to {output_path}");
    Ok(())
}
