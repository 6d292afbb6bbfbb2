
use _fixtures::{committed_session, small_config, SMALL_SECRET};
use fibsq_stark::config::{Witness, PROFILE_FIBSQ_1023};
use fibsq_stark::field::{FieldElement, FieldElementOps};
use fibsq_stark::fri::{fold_count, next_fri_layer};
use fibsq_stark::transcript::TranscriptPhase;

#[test]
fn canonical_composition_folds_ten_times_to_size_eight() {
    let session = committed_session(&PROFILE_FIBSQ_1023, Witness::CANONICAL_SECRET);
    let fri = &session.fri;
    assert_eq!(fri.layers[0].polynomial().degree(), Some(1023));
    assert_eq!(fold_count(1023), 10);
    assert_eq!(fri.num_folds(), 10);
    assert_eq!(fri.layers.len(), 11);

    let last = fri.final_layer().expect("final layer");
    assert_eq!(last.len(), 8);
    assert_eq!(last.polynomial().degree().unwrap_or(0), 0);
    assert!(last
        .evaluations()
        .iter()
        .all(|value| *value == fri.final_constant));
    assert_eq!(session.transcript.phase(), TranscriptPhase::Queries);
}

#[test]
fn every_layer_halves_and_squares_its_domain() {
    let session = committed_session(&small_config(), SMALL_SECRET);
    for pair in session.fri.layers.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        assert_eq!(next.len() * 2, current.len());
        let half = current.len() / 2;
        for i in 0..half {
            assert_eq!(current.domain()[i + half], current.domain()[i].neg());
            assert_eq!(next.domain()[i], current.domain()[i].square());
        }
    }
}

#[test]
fn committed_layers_match_pure_folding() {
    let session = committed_session(&small_config(), SMALL_SECRET);
    let fri = &session.fri;
    for (i, beta) in fri.fold_challenges.iter().enumerate() {
        let current = &fri.layers[i];
        let (poly, domain, evaluations) =
            next_fri_layer(current.polynomial(), current.domain(), beta);
        assert_eq!(&poly, fri.layers[i + 1].polynomial());
        assert_eq!(domain, fri.layers[i + 1].domain());
        assert_eq!(evaluations, fri.layers[i + 1].evaluations());
    }
}

#[test]
fn folding_relates_neighbouring_layers_pointwise() {
    // next(x^2) = (p(x) + p(-x)) / 2 + beta * (p(x) - p(-x)) / (2x)
    let session = committed_session(&small_config(), SMALL_SECRET);
    let fri = &session.fri;
    let two_inv = FieldElement::from(2u64).inv().expect("two is invertible");
    for (i, beta) in fri.fold_challenges.iter().enumerate() {
        let current = &fri.layers[i];
        let next = &fri.layers[i + 1];
        let half = current.len() / 2;
        for j in 0..half {
            let x = current.domain()[j];
            let (px, pnx) = (current.evaluations()[j], current.evaluations()[j + half]);
            let even = px.add(&pnx).mul(&two_inv);
            let odd = px
                .sub(&pnx)
                .mul(&two_inv)
                .mul(&x.inv().expect("coset points are non-zero"));
            assert_eq!(next.evaluations()[j], even.add(&beta.mul(&odd)));
        }
    }
}
