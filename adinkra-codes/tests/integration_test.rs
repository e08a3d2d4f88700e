use adinkra_codes::{
    hamming, hypercube, repetition, simple_bipartite, single_parity_check, BinaryMatrix, CodeError,
    Color, FieldKind, Graph, GraphEdge, GraphNode, LinearCode,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

fn assert_parity_contract(code: &LinearCode) {
    let g = code.generator_matrix();
    let h = code.parity_check_matrix();
    let product = BinaryMatrix::multiply(g, &h.transpose()).unwrap();
    assert!(product.is_zero(), "G·Hᵀ != 0 for {}", code);

    for row in 0..g.rows() {
        assert!(code.is_codeword(&g.row(row)).unwrap());
    }
}

fn pairwise_minimum(words: &[Vec<u8>], n: usize) -> usize {
    let mut min = n + 1;
    for i in 0..words.len() {
        for j in (i + 1)..words.len() {
            let dist = words[i]
                .iter()
                .zip(&words[j])
                .filter(|(a, b)| a != b)
                .count();
            if dist > 0 && dist < min {
                min = dist;
            }
        }
    }
    min
}

fn random_generator(rng: &mut ChaCha8Rng, k: usize, n: usize) -> BinaryMatrix {
    let rows: Vec<Vec<u8>> = (0..k)
        .map(|_| (0..n).map(|_| rng.gen_range(0..2u8)).collect())
        .collect();
    BinaryMatrix::from_rows(&rows).unwrap()
}

#[test]
fn test_end_to_end_named_codes() {
    let hamming = hamming(3).expect("Failed to create Hamming code");
    assert_eq!((hamming.n(), hamming.k(), hamming.minimum_distance()), (7, 4, 3));
    assert!((hamming.rate() - 4.0 / 7.0).abs() < 1e-12);

    let word = hamming.encode(&[1, 0, 1, 1]).unwrap();
    assert_eq!(hamming.syndrome(&word).unwrap(), vec![0, 0, 0]);

    let repetition = repetition(5).unwrap();
    assert_eq!((repetition.n(), repetition.k()), (5, 1));
    assert_eq!(repetition.encode(&[1]).unwrap(), vec![1; 5]);

    let parity = single_parity_check(4).unwrap();
    assert_eq!((parity.n(), parity.k()), (5, 4));
    let word = parity.encode(&[1, 1, 0, 0]).unwrap();
    assert_eq!(word[4], 0);

    for code in [&hamming, &repetition, &parity] {
        assert_parity_contract(code);
    }
}

#[test]
fn test_enumeration_matches_minimum_distance() {
    let codes = [
        hamming(3).unwrap(),
        hamming(4).unwrap(),
        repetition(4).unwrap(),
        single_parity_check(5).unwrap(),
    ];

    for code in &codes {
        let words: Vec<Vec<u8>> = code.codewords().collect();
        assert_eq!(words.len(), 1 << code.k());
        assert!(words.iter().all(|w| w.len() == code.n()));

        let distinct: HashSet<&Vec<u8>> = words.iter().collect();
        assert_eq!(distinct.len(), words.len(), "duplicate codewords in {}", code);

        assert_eq!(pairwise_minimum(&words, code.n()), code.minimum_distance());
        assert_eq!(code.weight_distribution().iter().sum::<usize>(), words.len());
    }
}

#[test]
fn test_seeded_random_generators() {
    let mut rng = ChaCha8Rng::seed_from_u64(12345);

    for _ in 0..40 {
        let k = rng.gen_range(1..7);
        let n = rng.gen_range(k..k + 12);
        let code = LinearCode::new(random_generator(&mut rng, k, n)).unwrap();

        assert_parity_contract(&code);
        assert_eq!(code.parity_check_matrix().rows(), n - code.rank());

        let words: Vec<Vec<u8>> = code.codewords().collect();
        assert_eq!(pairwise_minimum(&words, n), code.minimum_distance());
        for word in &words {
            assert!(code.is_codeword(word).unwrap());
        }
    }
}

#[test]
fn test_duplicate_codewords_do_not_collapse_distance() {
    let code = LinearCode::from_rows(&[[1, 1, 0], [1, 1, 0]]).unwrap();
    let words: Vec<Vec<u8>> = code.codewords().collect();
    assert_eq!(
        words,
        vec![vec![0, 0, 0], vec![1, 1, 0], vec![1, 1, 0], vec![0, 0, 0]]
    );

    // Messages 01 and 10 encode to the same word, so a plain pairwise
    // minimum over all message pairs would report 0
    let plain_minimum = (0..words.len())
        .flat_map(|i| ((i + 1)..words.len()).map(move |j| (i, j)))
        .map(|(i, j)| words[i].iter().zip(&words[j]).filter(|(a, b)| a != b).count())
        .min()
        .unwrap();
    assert_eq!(plain_minimum, 0);

    assert_eq!(code.minimum_distance(), 2);
    assert_eq!(code.info().error_detection_capability, 1);
}

#[test]
fn test_adinkra_pipeline() {
    let graph = simple_bipartite(2, 2, 2).unwrap();
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 8);
    assert!(graph.check_rules().all_satisfied());

    let codewords = graph.to_codeword_representation();
    let width = codewords.values().map(Vec::len).max().unwrap();

    let code = graph.to_linear_code().unwrap();
    assert_eq!(code.generator_matrix().rows(), 2);
    assert_eq!(code.generator_matrix().cols(), width);
    assert_parity_contract(&code);

    for dimension in 1..=4 {
        let cube = hypercube(dimension).unwrap();
        assert_eq!(cube.node_count(), 1 << dimension);
        assert_eq!(cube.edge_count(), dimension << dimension);
        assert!(cube.check_rules().all_satisfied());

        let (nominal_n, nominal_k) = cube.code_parameters();
        let code = cube.to_linear_code().unwrap();
        assert_eq!(code.k(), nominal_k);
        assert_eq!(code.n(), nominal_n);
        assert_parity_contract(&code);
    }
}

#[test]
fn test_error_kinds() {
    assert!(matches!(hamming(1), Err(CodeError::InvalidDimension(_))));
    assert!(matches!(repetition(0), Err(CodeError::InvalidDimension(_))));
    assert!(matches!(
        single_parity_check(0),
        Err(CodeError::InvalidDimension(_))
    ));

    let code = hamming(3).unwrap();
    assert!(matches!(
        code.encode(&[1, 0]),
        Err(CodeError::LengthMismatch {
            expected: 4,
            actual: 2
        })
    ));

    let mut graph = Graph::new(1).unwrap();
    let p = GraphNode::primary([0], "phi_0");
    let q = GraphNode::conjugate([0], "psi_0");
    let edge = GraphEdge::new(p.clone(), q, Color::Green, false).unwrap();
    assert!(matches!(
        graph.add_edge(edge),
        Err(CodeError::InvalidColor { .. })
    ));
    assert!(matches!(
        GraphEdge::new(p.clone(), p, Color::Red, false),
        Err(CodeError::InvalidEdgeEndpoints(FieldKind::Primary))
    ));
    assert_eq!(graph.to_linear_code().unwrap_err(), CodeError::EmptyGraph);
}

proptest! {
    #[test]
    fn prop_generator_rows_lie_in_null_space(
        rows in prop::collection::vec(prop::collection::vec(0u8..2, 10), 1..6)
    ) {
        let code = LinearCode::from_rows(&rows).unwrap();
        let product = BinaryMatrix::multiply(
            code.generator_matrix(),
            &code.parity_check_matrix().transpose(),
        ).unwrap();
        prop_assert!(product.is_zero());
    }

    #[test]
    fn prop_encoded_messages_are_codewords(
        rows in prop::collection::vec(prop::collection::vec(0u8..2, 9), 4),
        message in prop::collection::vec(0u8..2, 4),
    ) {
        let code = LinearCode::from_rows(&rows).unwrap();
        let word = code.encode(&message).unwrap();
        prop_assert_eq!(word.len(), 9);
        prop_assert!(code.is_codeword(&word).unwrap());
    }

    #[test]
    fn prop_single_bit_flip_detected_when_distance_allows(
        message in prop::collection::vec(0u8..2, 4),
        pos in 0usize..7,
    ) {
        let code = hamming(3).unwrap();
        let mut word = code.encode(&message).unwrap();
        word[pos] ^= 1;
        prop_assert!(!code.is_codeword(&word).unwrap());
    }
}
