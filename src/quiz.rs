use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_option_number_from_string;

use crate::db::Question;

/// Category selector sent by the quiz page. `type == "click"` is what the
/// frontend sends when "All" was picked, and then `id` is not read.
#[derive(Deserialize, Debug, Clone)]
pub struct QuizCategory {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizFilter {
    All,
    Category(i64),
}

impl QuizCategory {
    const ALL: &'static str = "click";

    /// `None` when a single category was chosen without saying which.
    pub fn filter(&self) -> Option<QuizFilter> {
        if self.kind == Self::ALL {
            Some(QuizFilter::All)
        } else {
            self.id.map(QuizFilter::Category)
        }
    }
}

impl QuizFilter {
    pub fn label(self) -> String {
        match self {
            Self::All => "all".to_owned(),
            Self::Category(id) => id.to_string(),
        }
    }
}

/// Picks uniformly among candidates whose id is not in `previous`. Once every
/// candidate has been seen the first one is served again, so a non-empty pool
/// always yields a question.
pub fn pick_next<'a, R: Rng + ?Sized>(
    candidates: &'a [Question],
    previous: &[i64],
    rng: &mut R,
) -> Option<&'a Question> {
    let unseen: Vec<&Question> = candidates
        .iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();
    match unseen.choose(rng) {
        Some(question) => Some(*question),
        None => candidates.first(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn questions(ids: &[i64]) -> Vec<Question> {
        ids.iter()
            .map(|&id| Question {
                id,
                question: format!("question {id}"),
                answer: "answer".to_owned(),
                category: 1,
                difficulty: 1,
            })
            .collect()
    }

    #[test]
    fn never_serves_seen_question_while_unseen_remain() {
        let pool = questions(&[1, 2, 3, 4, 5]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let picked = pick_next(&pool, &[1, 2, 4], &mut rng).unwrap();
            assert!(picked.id == 3 || picked.id == 5);
        }
    }

    #[test]
    fn every_unseen_question_can_be_picked() {
        let pool = questions(&[10, 20, 30]);
        let mut rng = StdRng::seed_from_u64(42);
        let picked: HashSet<i64> = (0..200)
            .map(|_| pick_next(&pool, &[], &mut rng).unwrap().id)
            .collect();
        assert_eq!(picked, HashSet::from([10, 20, 30]));
    }

    #[test]
    fn exhausted_pool_reserves_first_question() {
        let pool = questions(&[4, 8]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(pick_next(&pool, &[8, 4], &mut rng).unwrap().id, 4);
    }

    #[test]
    fn empty_pool_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(pick_next(&[], &[1], &mut rng).is_none());
    }

    #[test]
    fn click_selects_all_categories() {
        let all: QuizCategory = serde_json::from_str(r#"{"id": 0, "type": "click"}"#).unwrap();
        assert_eq!(all.filter(), Some(QuizFilter::All));
        assert_eq!(QuizFilter::All.label(), "all");

        let no_id: QuizCategory = serde_json::from_str(r#"{"type": "click"}"#).unwrap();
        assert_eq!(no_id.filter(), Some(QuizFilter::All));

        let science: QuizCategory =
            serde_json::from_str(r#"{"id": "1", "type": "Science"}"#).unwrap();
        assert_eq!(science.filter(), Some(QuizFilter::Category(1)));
        assert_eq!(QuizFilter::Category(1).label(), "1");
    }

    #[test]
    fn chosen_category_needs_an_id() {
        let missing: QuizCategory = serde_json::from_str(r#"{"type": "Science"}"#).unwrap();
        assert_eq!(missing.filter(), None);
    }
}
