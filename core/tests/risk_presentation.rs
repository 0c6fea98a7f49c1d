use churn_analytics_core::{
    present, present_with, presentation::Playbook, score, ChurnScorer, ColorBand,
    CustomerFeatures, RiskTier, Satisfaction, ScoringConfig,
};

#[test]
fn tiers_map_to_fixed_bands_and_labels() {
    let cases = [
        (CustomerFeatures::new(10, 10), RiskTier::Low, ColorBand::Green, "Healthy relationship"),
        (CustomerFeatures::new(120, 4), RiskTier::Medium, ColorBand::Amber, "Monitor"),
        (CustomerFeatures::new(300, 2), RiskTier::High, ColorBand::Red, "Reactive recovery"),
    ];

    for (features, tier, band, label) in cases {
        let assessment = score(&features);
        assert_eq!(assessment.tier, tier, "unexpected tier for {features:?}");
        let payload = present(&assessment);
        assert_eq!(payload.severity_color_band, band);
        assert_eq!(payload.label, label);
    }
}

#[test]
fn high_tier_actions_are_ordered() {
    let assessment = score(&CustomerFeatures::new(365, 1).with_satisfaction(Satisfaction::VeryDissatisfied));
    let payload = present(&assessment);
    assert_eq!(
        payload.actions,
        vec![
            "Issue retention discount",
            "Send satisfaction survey",
            "Contact via high-open-rate channel",
        ]
    );
}

/// Payload depends on the tier only, and repeated calls agree.
#[test]
fn present_is_pure_in_the_tier() {
    let mut a = score(&CustomerFeatures::new(200, 2));
    let mut b = a.clone();
    a.score = 71.0;
    b.score = 99.0;
    assert_eq!(a.tier, RiskTier::High);
    assert_eq!(present(&a), present(&b));
    assert_eq!(present(&a), present(&a));
}

#[test]
fn custom_playbook_is_honored() {
    let mut playbook = Playbook::default();
    playbook.medium.label = "Watch list".into();
    playbook.medium.actions = vec!["Call within a week".into()];

    let scorer = ChurnScorer::new(ScoringConfig {
        playbook: playbook.clone(),
        ..ScoringConfig::default()
    });
    let assessment = scorer.score(&CustomerFeatures::new(120, 4));
    assert_eq!(assessment.tier, RiskTier::Medium);
    assert_eq!(assessment.recommended_actions, vec!["Call within a week".to_string()]);

    let payload = present_with(&assessment, &playbook);
    assert_eq!(payload.label, "Watch list");
    assert_eq!(payload.severity_color_band, ColorBand::Amber);
    assert_eq!(payload.actions, assessment.recommended_actions);
}
