use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fas_rust::dlog::DlogTable;
use fas_rust::group::mul_generator;
use fas_rust::util::scalars_from_u64;
use fas_rust::{Fas, FasConfig, KeyPair, Scalar};
use ark_std::rand::SeedableRng;
use rand::rngs::StdRng;
use rand::Rng;

const MSG: &[u8] = b"benchmark payment";
const DIMS: [usize; 3] = [16, 64, 256];
const VALUE_BOUND: u64 = 10;

fn small_vector(rng: &mut StdRng, len: usize) -> Vec<Scalar> {
    let vals: Vec<u64> = (0..len).map(|_| rng.gen_range(0..VALUE_BOUND)).collect();
    scalars_from_u64(&vals)
}

fn benchmark_seller_side(c: &mut Criterion) {
    let mut group = c.benchmark_group("seller");
    group.sample_size(10);

    for faslen in DIMS {
        let fas = Fas::new(FasConfig::new(faslen)).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let statement = vec![[0u8; 32]; faslen];
        let witness = small_vector(&mut rng, faslen);
        let f = small_vector(&mut rng, faslen);

        group.bench_function(BenchmarkId::new("adgen", faslen), |b| {
            b.iter(|| {
                let mut local_rng = StdRng::seed_from_u64(7);
                fas.adgen(black_box(&statement), black_box(&witness), &mut local_rng)
                    .unwrap()
            });
        });

        let (advt, st) = fas.adgen(&statement, &witness, &mut rng).unwrap();
        group.bench_function(BenchmarkId::new("auxgen", faslen), |b| {
            b.iter(|| fas.auxgen(black_box(&advt), &st, black_box(&f)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_buyer_side(c: &mut Criterion) {
    let mut group = c.benchmark_group("buyer");
    group.sample_size(10);

    for faslen in DIMS {
        let fas = Fas::new(FasConfig::new(faslen)).unwrap();
        let mut rng = StdRng::seed_from_u64(43);
        let statement = vec![[0u8; 32]; faslen];
        let witness = small_vector(&mut rng, faslen);
        let f = small_vector(&mut rng, faslen);
        let kp = KeyPair::generate(&mut rng);

        let (advt, st) = fas.adgen(&statement, &witness, &mut rng).unwrap();
        let aux = fas.auxgen(&advt, &st, &f).unwrap();
        let presig = fas
            .fpresign(&advt, kp.secret(), MSG, &f, &aux.aux_f, &mut rng)
            .unwrap();
        let sig = fas.adapt(&advt, &st, &f, &presig).unwrap();
        let bound = faslen as u64 * VALUE_BOUND * VALUE_BOUND;

        group.bench_function(BenchmarkId::new("aux_verify", faslen), |b| {
            b.iter(|| fas.aux_verify(black_box(&advt), black_box(&f), &aux).unwrap());
        });

        group.bench_function(BenchmarkId::new("fext_offline", faslen), |b| {
            b.iter(|| fas.fext_offline(black_box(&advt), black_box(&f), &aux.pi_f).unwrap());
        });

        let ct2 = fas.fext_offline(&advt, &f, &aux.pi_f).unwrap();
        group.bench_function(BenchmarkId::new("fext_online", faslen), |b| {
            b.iter(|| {
                fas.fext_online(&advt, &presig, black_box(&sig), bound, &ct2)
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn benchmark_dlog(c: &mut Criterion) {
    let mut group = c.benchmark_group("dlog");
    group.sample_size(10);

    for bound in [1_000u64, 100_000, 10_000_000] {
        group.bench_function(BenchmarkId::new("table_build", bound), |b| {
            b.iter(|| DlogTable::new(black_box(bound)).unwrap());
        });

        let table = DlogTable::new(bound).unwrap();
        let target = mul_generator(&Scalar::from(bound - 1));
        group.bench_function(BenchmarkId::new("solve_worst_case", bound), |b| {
            b.iter(|| table.solve(black_box(&target)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_seller_side, benchmark_buyer_side, benchmark_dlog);
criterion_main!(benches);
