use fibsq_stark::config::PROFILE_FIBSQ_1023;
use fibsq_stark::field::FieldElement;
use fibsq_stark::hash::hash;
use fibsq_stark::transcript::{
    LayerSide, TraceOffset, Transcript, TranscriptError, TranscriptLabel, TranscriptPhase,
};
use insta::assert_snapshot;
use proptest::prelude::*;

fn opened(seed: &[u8]) -> Result<Transcript, TranscriptError> {
    let mut transcript = Transcript::new(&hash(seed));
    transcript.send(TranscriptLabel::TraceRoot, "ab".repeat(32).as_str())?;
    Ok(transcript)
}

#[test]
fn same_history_same_challenges() -> Result<(), TranscriptError> {
    let mut first = opened(b"determinism")?;
    let mut second = opened(b"determinism")?;
    for i in 0..3 {
        assert_eq!(
            first.derive_field_element(TranscriptLabel::CompositionAlpha(i))?,
            second.derive_field_element(TranscriptLabel::CompositionAlpha(i))?
        );
    }
    assert_eq!(first.state_digest(), second.state_digest());
    assert_eq!(first.entries(), second.entries());
    Ok(())
}

#[test]
fn sent_value_changes_later_challenges() -> Result<(), TranscriptError> {
    let mut first = Transcript::new(&hash(b"seed"));
    let mut second = Transcript::new(&hash(b"seed"));
    first.send(TranscriptLabel::TraceRoot, "00")?;
    second.send(TranscriptLabel::TraceRoot, "01")?;
    assert_ne!(
        first.derive_field_element(TranscriptLabel::CompositionAlpha(0))?,
        second.derive_field_element(TranscriptLabel::CompositionAlpha(0))?
    );
    Ok(())
}

#[test]
fn instance_digest_seeds_the_transcript() {
    let result = FieldElement::from(2_338_775_057u64);
    let canonical = Transcript::new(&PROFILE_FIBSQ_1023.instance_digest(&result));
    let other_result = Transcript::new(&PROFILE_FIBSQ_1023.instance_digest(&FieldElement::ONE));
    assert_ne!(canonical.state_digest(), other_result.state_digest());
}

#[test]
fn out_of_order_labels_are_rejected() -> Result<(), TranscriptError> {
    let mut transcript = Transcript::new(&hash(b"order"));
    let err = transcript
        .derive_field_element(TranscriptLabel::CompositionAlpha(0))
        .unwrap_err();
    assert_snapshot!(err.to_string(), @"label alpha_0 used out of order during trace commit phase");

    transcript.send(TranscriptLabel::TraceRoot, "00")?;
    assert!(transcript
        .derive_field_element(TranscriptLabel::CompositionAlpha(1))
        .is_err());
    assert!(transcript.send(TranscriptLabel::CompositionRoot, "00").is_err());
    assert_eq!(transcript.phase(), TranscriptPhase::Composition);
    assert_eq!(transcript.entries().len(), 1);
    Ok(())
}

#[test]
fn challenges_cannot_be_sent() -> Result<(), TranscriptError> {
    let mut transcript = opened(b"send-challenge")?;
    assert!(transcript
        .send(TranscriptLabel::CompositionAlpha(0), "5")
        .is_err());
    Ok(())
}

#[test]
fn full_cycle_without_folds() -> Result<(), TranscriptError> {
    let mut transcript = opened(b"cycle")?;
    for i in 0..3 {
        transcript.derive_field_element(TranscriptLabel::CompositionAlpha(i))?;
    }
    transcript.send(TranscriptLabel::CompositionRoot, "00")?;
    transcript.send(TranscriptLabel::FriFinalConstant, "7")?;
    assert_eq!(transcript.phase(), TranscriptPhase::Queries);

    for _ in 0..2 {
        transcript.derive_index(TranscriptLabel::QueryIndex, 0, 10)?;
        for offset in TraceOffset::ALL {
            transcript.send(TranscriptLabel::TraceValue(offset), "1")?;
            transcript.send(TranscriptLabel::TracePath(offset), "")?;
        }
        assert!(transcript
            .send(
                TranscriptLabel::LayerValue {
                    layer: 0,
                    side: LayerSide::X
                },
                "1"
            )
            .is_err());
        transcript.send(TranscriptLabel::QueryFinalConstant, "7")?;
    }
    assert_eq!(transcript.entries().len(), 6 + 2 * 8);
    Ok(())
}

proptest! {
    #[test]
    fn derived_index_stays_in_range(seed in any::<u64>(), low in 0usize..1000, span in 0usize..1000) {
        let mut transcript = opened(&seed.to_le_bytes()).expect("trace root accepted");
        for i in 0..3 {
            transcript.derive_field_element(TranscriptLabel::CompositionAlpha(i)).expect("alpha");
        }
        transcript.send(TranscriptLabel::CompositionRoot, "00").expect("root");
        transcript.send(TranscriptLabel::FriFinalConstant, "0").expect("final");
        let index = transcript
            .derive_index(TranscriptLabel::QueryIndex, low, low + span)
            .expect("index");
        prop_assert!(index >= low && index <= low + span);
        let recorded = transcript.entries().last().expect("recorded").value.clone();
        prop_assert_eq!(recorded, index.to_string());
    }
}
