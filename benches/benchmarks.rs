use nashpivot::*;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        multiplying_rationals,
        factoring_basis_lu,
        solving_lemke_howson_dense,
        solving_lemke_howson_factored,
        solving_lemke_howson_approximate,
        enumerating_vertices,
        subdividing_three_players,
}

fn square(n: usize) -> NormalFormGame {
    NormalFormGame::random_shape(&[n, n]).expect("valid shape")
}

fn multiplying_rationals(c: &mut criterion::Criterion) {
    let x = "355/113".parse::<Rational>().expect("rational");
    let y = "-22/7".parse::<Rational>().expect("rational");
    c.bench_function("multiply and add two Rationals", |b| {
        b.iter(|| x.clone() * &y + &x)
    });
}

fn factoring_basis_lu(c: &mut criterion::Criterion) {
    let ref a = square(12).matrix(0).expect("bimatrix");
    c.bench_function("factor a 12x12 Rational matrix", |b| {
        b.iter(|| Lu::factor(a.clone()))
    });
}

fn solving_lemke_howson_dense(c: &mut criterion::Criterion) {
    let ref game = square(8);
    let ref cancel = Cancel::new();
    c.bench_function("solve an 8x8 game with Lemke-Howson (dense)", |b| {
        b.iter(|| LemkeHowson::from_label::<Rational, Tableau<_>>(game, 0, cancel))
    });
}

fn solving_lemke_howson_factored(c: &mut criterion::Criterion) {
    let ref game = square(8);
    let ref cancel = Cancel::new();
    c.bench_function("solve an 8x8 game with Lemke-Howson (LU)", |b| {
        b.iter(|| LemkeHowson::from_label::<Rational, RevisedTableau<_>>(game, 0, cancel))
    });
}

fn solving_lemke_howson_approximate(c: &mut criterion::Criterion) {
    let ref game = square(8);
    let ref cancel = Cancel::new();
    c.bench_function("solve an 8x8 game with Lemke-Howson (f64)", |b| {
        b.iter(|| LemkeHowson::from_label::<f64, Tableau<_>>(game, 0, cancel))
    });
}

fn enumerating_vertices(c: &mut criterion::Criterion) {
    let ref game = square(4);
    let ref cancel = Cancel::new();
    c.bench_function("enumerate extreme equilibria of a 4x4 game", |b| {
        b.iter(|| Enumeration::equilibria::<Rational, Tableau<_>>(game, cancel))
    });
}

fn subdividing_three_players(c: &mut criterion::Criterion) {
    let ref game = NormalFormGame::random_shape(&[2, 2, 2]).expect("valid shape");
    let ref config = Config::approximate();
    c.bench_function("approximate a 2x2x2 game by subdivision", |b| {
        b.iter(|| SimplicialSubdivision::equilibrium::<f64>(game, config))
    });
}
