use std::sync::LazyLock;

use informa_common::GeocodeResult;
use regex::Regex;
use serper_client::{AnswerBox, KnowledgeGraph, OrganicResult, SearchBundle};

/// A latitude-shaped decimal, a separator without digits or signs, then a
/// longitude-shaped decimal. Digits are ASCII only.
static COORD_PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([-+]?[0-9]{1,2}\.[0-9]+)[^0-9+\-]+([-+]?[0-9]{1,3}\.[0-9]+)").unwrap());

/// Pulls a coordinate pair out of a search bundle.
///
/// Sources are tried in fixed order: answer box, knowledge graph, then each
/// organic result (snippet before title). The first hit wins.
///
/// The default extractor does not range-check: text such as prices or phone
/// numbers can match the pattern. `strict()` rejects pairs outside
/// lat [-90, 90] / lng [-180, 180] and keeps scanning.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateExtractor {
    strict_bounds: bool,
}

impl CoordinateExtractor {
    pub fn new(strict_bounds: bool) -> Self {
        Self { strict_bounds }
    }

    pub fn strict() -> Self {
        Self::new(true)
    }

    pub fn extract(&self, bundle: Option<&SearchBundle>) -> Option<GeocodeResult> {
        let bundle = bundle?;

        bundle
            .answer_box
            .as_ref()
            .and_then(|answer| self.from_answer_box(answer))
            .or_else(|| {
                bundle
                    .knowledge_graph
                    .as_ref()
                    .and_then(|kg| self.from_knowledge_graph(kg))
            })
            .or_else(|| self.from_organic(&bundle.organic))
    }

    /// First acceptable pair in free text.
    ///
    /// After a rejected pair, its longitude is retried as the latitude of the
    /// next candidate; failing that, scanning resumes after the match.
    pub fn from_text(&self, text: &str) -> Option<GeocodeResult> {
        let mut candidate = COORD_PAIR_RE.captures(text);
        while let Some(caps) = candidate {
            let lat: f64 = caps[1].parse().ok()?;
            let lng: f64 = caps[2].parse().ok()?;
            if let Some(result) = GeocodeResult::new(lat, lng).filter(|r| self.accepts(r)) {
                return Some(result);
            }

            let lng_start = caps.get(2)?.start();
            candidate = COORD_PAIR_RE
                .captures_at(text, lng_start)
                .filter(|next| next.get(0).is_some_and(|m| m.start() == lng_start))
                .or_else(|| COORD_PAIR_RE.captures_at(text, caps.get(0)?.end()));
        }
        None
    }

    fn from_answer_box(&self, answer: &AnswerBox) -> Option<GeocodeResult> {
        let (lat, lng) = (answer.latitude.as_deref()?, answer.longitude.as_deref()?);
        self.from_text(&format!("{lat}, {lng}"))
    }

    fn from_knowledge_graph(&self, kg: &KnowledgeGraph) -> Option<GeocodeResult> {
        GeocodeResult::new(kg.latitude?, kg.longitude?).filter(|r| self.accepts(r))
    }

    fn from_organic(&self, organic: &[OrganicResult]) -> Option<GeocodeResult> {
        organic.iter().find_map(|result| {
            result
                .snippet
                .as_deref()
                .and_then(|snippet| self.from_text(snippet))
                .or_else(|| result.title.as_deref().and_then(|title| self.from_text(title)))
        })
    }

    fn accepts(&self, result: &GeocodeResult) -> bool {
        !self.strict_bounds || result.within_bounds()
    }
}
