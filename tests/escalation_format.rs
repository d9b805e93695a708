use demand_pressure::{
    escalation_progress, escalation_stage, format_number, signers_to_next_stage, EscalationStage,
};

#[test]
fn stage_boundaries_belong_to_the_higher_stage() {
    assert_eq!(escalation_stage(0), EscalationStage::Petition);
    assert_eq!(escalation_stage(999), EscalationStage::Petition);
    assert_eq!(escalation_stage(1_000), EscalationStage::Campaign);
    assert_eq!(escalation_stage(9_999), EscalationStage::Campaign);
    assert_eq!(escalation_stage(10_000), EscalationStage::Movement);
    assert_eq!(escalation_stage(99_999), EscalationStage::Movement);
    assert_eq!(escalation_stage(100_000), EscalationStage::Crisis);
    assert_eq!(escalation_stage(u64::MAX), EscalationStage::Crisis);
}

#[test]
fn stage_descriptors_are_contiguous() {
    let stages = EscalationStage::ALL;
    assert_eq!(stages[0].descriptor().min, 0);
    for pair in stages.windows(2) {
        let lower = pair[0].descriptor();
        let upper = pair[1].descriptor();
        assert_eq!(lower.max, Some(upper.min));
        assert!(pair[0] < pair[1]);
        assert_eq!(pair[0].next(), Some(pair[1]));
    }
    assert_eq!(EscalationStage::Crisis.descriptor().max, None);
    assert_eq!(EscalationStage::Crisis.next(), None);

    for stage in stages {
        assert!(stage.contains(stage.descriptor().min));
        assert_eq!(escalation_stage(stage.descriptor().min), stage);
    }
}

#[test]
fn progress_hits_breakpoints_at_stage_boundaries() {
    assert!((escalation_progress(0) - 0.0).abs() < 1e-9);
    assert!((escalation_progress(500) - 25.0).abs() < 1e-9);
    assert!((escalation_progress(1_000) - 50.0).abs() < 1e-9);
    assert!((escalation_progress(5_500) - 62.5).abs() < 1e-9);
    assert!((escalation_progress(10_000) - 75.0).abs() < 1e-9);
    assert!((escalation_progress(55_000) - 87.5).abs() < 1e-9);
    assert!((escalation_progress(100_000) - 100.0).abs() < 1e-9);
    assert!((escalation_progress(u64::MAX) - 100.0).abs() < 1e-9);

    assert!(escalation_progress(999) < 50.0);
    assert!(escalation_progress(9_999) < 75.0);
    assert!(escalation_progress(99_999) < 100.0);
}

#[test]
fn progress_and_stage_never_decrease() {
    let mut previous_progress = 0.0;
    let mut previous_stage = EscalationStage::Petition;
    let mut count = 0u64;
    while count <= 120_000 {
        let progress = escalation_progress(count);
        let stage = escalation_stage(count);
        assert!(progress >= previous_progress);
        assert!((0.0..=100.0).contains(&progress));
        assert!(stage >= previous_stage);
        previous_progress = progress;
        previous_stage = stage;
        count += 37;
    }
}

#[test]
fn signers_needed_to_reach_next_stage() {
    assert_eq!(signers_to_next_stage(0), Some(1_000));
    assert_eq!(signers_to_next_stage(999), Some(1));
    assert_eq!(signers_to_next_stage(1_000), Some(9_000));
    assert_eq!(signers_to_next_stage(99_000), Some(1_000));
    assert_eq!(signers_to_next_stage(100_000), None);
}

#[test]
fn formats_compact_numbers() {
    assert_eq!(format_number(0.0), "0");
    assert_eq!(format_number(999.0), "999");
    assert_eq!(format_number(1_000.0), "1.0K");
    assert_eq!(format_number(1_500.0), "1.5K");
    assert_eq!(format_number(1_250.0), "1.3K");
    assert_eq!(format_number(12_345.0), "12.3K");
    assert_eq!(format_number(1_000_000.0), "1.0M");
    assert_eq!(format_number(2_500_000.0), "2.5M");
}

#[test]
fn small_and_negative_numbers_print_plainly() {
    assert_eq!(format_number(42.0), "42");
    assert_eq!(format_number(12.5), "12.5");
    assert_eq!(format_number(-1_500.0), "-1500");
}
