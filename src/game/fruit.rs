//! Fruit catalog and weighted selection

use rand::Rng;

/// A kind of fruit that can appear on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FruitType {
    pub name: &'static str,
    /// RGB color used by the renderer
    pub color: (u8, u8, u8),
    pub points: u32,
    /// Relative spawn weight; rarer fruit is worth more
    pub weight: u32,
}

pub const FRUITS: [FruitType; 6] = [
    FruitType {
        name: "Apple",
        color: (0xff, 0x3b, 0x30),
        points: 10,
        weight: 30,
    },
    FruitType {
        name: "Banana",
        color: (0xff, 0xd6, 0x0a),
        points: 15,
        weight: 25,
    },
    FruitType {
        name: "Orange",
        color: (0xff, 0x9f, 0x0a),
        points: 20,
        weight: 20,
    },
    FruitType {
        name: "Grapes",
        color: (0x58, 0x56, 0xd6),
        points: 25,
        weight: 15,
    },
    FruitType {
        name: "Strawberry",
        color: (0xff, 0x2d, 0x55),
        points: 30,
        weight: 8,
    },
    FruitType {
        name: "Pineapple",
        color: (0x34, 0xc7, 0x59),
        points: 40,
        weight: 2,
    },
];

pub fn total_weight() -> u32 {
    FRUITS.iter().map(|f| f.weight).sum()
}

/// Pick a fruit for a roll in `[0, total_weight())`
///
/// Walks the catalog subtracting weights and returns the entry at which the
/// remainder first drops to zero or below.
pub fn fruit_for_roll(roll: f64) -> &'static FruitType {
    let mut remaining = roll;
    for fruit in &FRUITS {
        remaining -= fruit.weight as f64;
        if remaining <= 0.0 {
            return fruit;
        }
    }
    &FRUITS[0]
}

pub fn random_fruit<R: Rng>(rng: &mut R) -> &'static FruitType {
    let roll = rng.gen_range(0.0..total_weight() as f64);
    fruit_for_roll(roll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_weights_sum_to_hundred() {
        assert_eq!(total_weight(), 100);
    }

    #[test]
    fn test_zero_roll_is_apple() {
        assert_eq!(fruit_for_roll(0.0).name, "Apple");
    }

    #[test]
    fn test_roll_boundaries() {
        assert_eq!(fruit_for_roll(30.0).name, "Apple");
        assert_eq!(fruit_for_roll(30.5).name, "Banana");
        assert_eq!(fruit_for_roll(55.0).name, "Banana");
        assert_eq!(fruit_for_roll(75.5).name, "Grapes");
        assert_eq!(fruit_for_roll(98.0).name, "Strawberry");
        assert_eq!(fruit_for_roll(99.9).name, "Pineapple");
    }

    #[test]
    fn test_out_of_range_roll_falls_back() {
        assert_eq!(fruit_for_roll(1000.0).name, "Apple");
    }

    #[test]
    fn test_random_draw_is_proportional() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut apples = 0;
        let mut pineapples = 0;
        for _ in 0..10_000 {
            match random_fruit(&mut rng).name {
                "Apple" => apples += 1,
                "Pineapple" => pineapples += 1,
                _ => {}
            }
        }
        assert!(apples > 2500 && apples < 3500, "apples = {apples}");
        assert!(pineapples < 500, "pineapples = {pineapples}");
    }

    #[test]
    fn test_rarer_fruit_scores_more() {
        for pair in FRUITS.windows(2) {
            assert!(pair[0].weight > pair[1].weight);
            assert!(pair[0].points < pair[1].points);
        }
    }
}
