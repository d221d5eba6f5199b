use arbitrary::{unstructured::Unstructured, Arbitrary};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};
use structopt::StructOpt;

use std::time;

use rbset::RbTree;

/// Command line options.
#[derive(Clone, StructOpt)]
pub struct Opt {
    #[structopt(long = "seed")]
    seed: Option<u64>,

    #[structopt(long = "loads", default_value = "1000000")] // default 1M
    loads: usize,

    #[structopt(long = "inserts", default_value = "0")]
    inserts: usize,

    // capped by the number of keys present in the tree.
    #[structopt(long = "deletes", default_value = "0")]
    deletes: usize,

    #[structopt(long = "gets", default_value = "0")]
    gets: usize,

    #[structopt(long = "validate")]
    validate: bool,
}

fn main() {
    let opts = Opt::from_args();
    let seed = opts.seed.unwrap_or_else(random);
    println!("seed {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut tree: RbTree<u64> = RbTree::new();
    // keys present in the tree, deletes pick from here.
    let mut keys: Vec<u64> = Vec::with_capacity(opts.loads);

    // initial load
    let start = time::Instant::now();
    for _i in 0..opts.loads {
        let key = rng.gen::<u64>();
        if tree.insert(key) {
            keys.push(key);
        }
    }
    println!("loaded {} items in {:?}", tree.len(), start.elapsed());

    let start = time::Instant::now();
    let counts = do_incremental(&mut rng, &mut keys, &opts, &mut tree);
    println!(
        "incremental inserts:{} deletes:{} gets:{}, took {:?}",
        counts[0],
        counts[1],
        counts[2],
        start.elapsed()
    );

    let start = time::Instant::now();
    let n = tree.iter().count();
    println!("iter for iterating {}, took {:?}", n, start.elapsed());

    if opts.validate {
        let start = time::Instant::now();
        match tree.validate() {
            Ok(stats) => println!("validate {:?}, took {:?}", stats, start.elapsed()),
            Err(err) => println!("validate failed: {}", err),
        }
    }
}

fn do_incremental(
    rng: &mut SmallRng,
    keys: &mut Vec<u64>,
    opts: &Opt,
    tree: &mut RbTree<u64>,
) -> [usize; 3] {
    let mut counts = [0_usize; 3];

    loop {
        let inserts = counts[0] < opts.inserts;
        let deletes = counts[1] < opts.deletes && !keys.is_empty();
        let gets = counts[2] < opts.gets;
        if !(inserts || deletes || gets) {
            break counts;
        }

        let bytes = rng.gen::<[u8; 32]>();
        let mut uns = Unstructured::new(&bytes);

        match uns.arbitrary::<Op>() {
            Ok(Op::Insert(key)) if inserts => {
                if tree.insert(key) {
                    keys.push(key);
                }
                counts[0] += 1;
            }
            Ok(Op::Delete) if deletes => {
                let key = keys.swap_remove(rng.gen::<usize>() % keys.len());
                if let Err(err) = tree.delete(&key) {
                    panic!("delete of loaded key {}: {}", key, err);
                }
                counts[1] += 1;
            }
            Ok(Op::Get(key)) if gets => {
                tree.contains(&key);
                counts[2] += 1;
            }
            Ok(_) | Err(_) => (),
        }
    }
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Insert(u64),
    Delete,
    Get(u64),
}

#[cfg(test)]
mod perf_test {
    use super::*;

    #[test]
    fn test_deletes_beyond_loads() {
        let seed: u64 = random();
        println!("test_deletes_beyond_loads {}", seed);
        let mut rng = SmallRng::seed_from_u64(seed);

        let mut tree: RbTree<u64> = RbTree::new();
        let mut keys: Vec<u64> = vec![];
        for _i in 0..100 {
            let key = rng.gen::<u64>();
            if tree.insert(key) {
                keys.push(key);
            }
        }

        let opts = Opt {
            seed: Some(seed),
            loads: 100,
            inserts: 10,
            deletes: 1000,
            gets: 10,
            validate: true,
        };
        let counts = do_incremental(&mut rng, &mut keys, &opts, &mut tree);

        assert_eq!(counts[0], 10);
        assert_eq!(counts[2], 10);
        // every delete hit a present key, and the tree drained.
        assert_eq!(counts[1], 100 + 10);
        assert!(tree.is_empty());
        assert!(keys.is_empty());
        tree.validate().unwrap();
    }
}
