use prakriti_core::models::assessment::AnswerSet;
use prakriti_core::models::dosha::Dosha;
use prakriti_core::models::question::Question;
use prakriti_scoring::constitution::{primary_key, Constitution, TRIDOSHA_LABEL};
use prakriti_scoring::error::ScoringError;
use prakriti_scoring::scoring::DoshaScores;
use prakriti_scoring::{progress_percent, score_answers};
use uuid::Uuid;

fn label(vata: u32, pitta: u32, kapha: u32) -> &'static str {
    DoshaScores::new(vata, pitta, kapha).constitution().label()
}

fn question(order: i32) -> Question {
    Question {
        id: Uuid::new_v4(),
        display_order: order,
        category: "Body".to_string(),
        question: format!("Question {order}"),
        vata_option: "Thin".to_string(),
        pitta_option: "Medium".to_string(),
        kapha_option: "Broad".to_string(),
    }
}

#[test]
fn single_maximum_names_that_dosha() {
    assert_eq!(label(5, 0, 0), "Vata");
    assert_eq!(label(0, 5, 0), "Pitta");
    assert_eq!(label(0, 0, 5), "Kapha");
    assert_eq!(label(3, 1, 2), "Vata");
    assert_eq!(label(1, 2, 1), "Pitta");
}

#[test]
fn two_way_ties_above_the_third_hyphenate() {
    assert_eq!(label(3, 3, 1), "Vata-Pitta");
    assert_eq!(label(3, 1, 3), "Vata-Kapha");
    assert_eq!(label(1, 3, 3), "Pitta-Kapha");
}

#[test]
fn three_way_tie_is_tridosha() {
    assert_eq!(label(2, 2, 2), TRIDOSHA_LABEL);
    assert_eq!(label(0, 0, 0), TRIDOSHA_LABEL);
}

#[test]
fn tie_below_the_maximum_keeps_single_label() {
    // Pitta and Kapha tie, but under Vata.
    assert_eq!(label(4, 1, 1), "Vata");
    // Vata and Kapha tie under Pitta.
    assert_eq!(label(1, 4, 1), "Pitta");
    assert_eq!(label(1, 1, 4), "Kapha");
}

#[test]
fn label_is_deterministic_and_round_trips() {
    for (v, p, k) in [(5, 0, 0), (3, 3, 1), (1, 3, 3), (2, 2, 2)] {
        let first = DoshaScores::new(v, p, k).constitution();
        let second = DoshaScores::new(v, p, k).constitution();
        assert_eq!(first, second);
        assert_eq!(first.label().parse::<Constitution>().unwrap(), first);
    }
}

#[test]
fn primary_key_takes_text_before_first_hyphen() {
    assert_eq!(primary_key("Vata-Pitta"), "Vata");
    assert_eq!(primary_key("Pitta-Kapha"), "Pitta");
    assert_eq!(primary_key("Kapha"), "Kapha");
    assert_eq!(primary_key(TRIDOSHA_LABEL), "Tri");
}

#[test]
fn complete_answers_sum_to_question_count() {
    let questions: Vec<Question> = (1..=7).map(question).collect();
    let picks = [
        Dosha::Vata,
        Dosha::Pitta,
        Dosha::Pitta,
        Dosha::Kapha,
        Dosha::Vata,
        Dosha::Pitta,
        Dosha::Kapha,
    ];
    let answers: AnswerSet = questions.iter().map(|q| q.id).zip(picks).collect();

    let scored = score_answers(&questions, &answers).unwrap();
    assert_eq!(scored.scores.total(), 7);
    assert_eq!(scored.scores, DoshaScores::new(2, 3, 2));
    assert_eq!(scored.constitution, Constitution::Pitta);
}

#[test]
fn incomplete_answers_are_rejected() {
    let questions: Vec<Question> = (1..=3).map(question).collect();
    let mut answers = AnswerSet::new();
    answers.insert(questions[0].id, Dosha::Vata);

    let err = score_answers(&questions, &answers).unwrap_err();
    assert_eq!(err, ScoringError::Incomplete { answered: 1, total: 3 });
}

#[test]
fn progress_is_unrounded_percentage() {
    assert_eq!(progress_percent(0, 4), 0.0);
    assert_eq!(progress_percent(1, 4), 25.0);
    assert!((progress_percent(1, 3) - 33.333_333).abs() < 1e-4);
    assert_eq!(progress_percent(0, 0), 0.0);
}
