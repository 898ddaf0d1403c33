//! End-to-end matching: validate the topic, extract the specialty map from
//! the uploaded resumes, rank the professors against the topic.

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::lattes;
use crate::models::{Ranking, ResumeFile};
use crate::scoring::{self, SimilarityScorer};

/// Front door of the crate. The scorer is passed in explicitly; the
/// matcher holds no session or global state.
#[derive(Clone)]
pub struct AdvisorMatcher {
    scorer: Arc<dyn SimilarityScorer>,
}

impl AdvisorMatcher {
    pub fn new(scorer: Arc<dyn SimilarityScorer>) -> Self {
        Self { scorer }
    }

    /// Suggests advisors for `topic` from the given resume documents.
    ///
    /// The topic is validated before any parsing, so an empty topic is
    /// reported even when one of the resumes is also malformed.
    pub async fn suggest(&self, topic: &str, resumes: &[ResumeFile]) -> Result<Ranking> {
        let topic = scoring::ensure_topic(topic)?;
        let professors = lattes::extract(resumes)?;
        scoring::rank(topic, &professors, self.scorer.as_ref()).await
    }

    /// Like [`AdvisorMatcher::suggest`], loading `*.xml` files from `dir`
    /// first.
    pub async fn suggest_from_dir(&self, topic: &str, dir: impl AsRef<Path>) -> Result<Ranking> {
        let topic = scoring::ensure_topic(topic)?;
        let resumes = lattes::read_resume_dir(dir)?;
        self.suggest(topic, &resumes).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::error::MatchError;
    use async_trait::async_trait;

    const ALMEIDA: &str = r#"<CURRICULO-VITAE>
        <DADOS-GERAIS NOME-COMPLETO="Ada Almeida"/>
        <AREA-DE-ATUACAO NOME-DA-ESPECIALIDADE="Banco de Dados"/>
        <AREA-DE-ATUACAO NOME-DA-ESPECIALIDADE="Aprendizado de Maquina"/>
    </CURRICULO-VITAE>"#;

    const SILVA: &str = r#"<CURRICULO-VITAE>
        <DADOS-GERAIS NOME-COMPLETO="Bento Silva"/>
        <AREA-DE-ATUACAO NOME-DA-ESPECIALIDADE="Compiladores"/>
    </CURRICULO-VITAE>"#;

    /// Pops one score batch per call; records the topics it was given.
    #[derive(Default)]
    struct StubScorer {
        replies: Mutex<VecDeque<Vec<f64>>>,
        topics: Mutex<Vec<String>>,
    }

    impl StubScorer {
        fn scripted(replies: Vec<Vec<f64>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().collect()),
                topics: Mutex::new(Vec::new()),
            }
        }

        fn topics(&self) -> Vec<String> {
            self.topics.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SimilarityScorer for StubScorer {
        async fn score(&self, source: &str, _sentences: &[String]) -> Result<Vec<f64>> {
            self.topics.lock().unwrap().push(source.to_string());
            Ok(self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("scorer called more times than scripted"))
        }
    }

    fn resumes() -> Vec<ResumeFile> {
        vec![
            ResumeFile::new("almeida.xml", ALMEIDA.as_bytes().to_vec()),
            ResumeFile::new("silva.xml", SILVA.as_bytes().to_vec()),
        ]
    }

    #[tokio::test]
    async fn suggests_the_best_matching_professor() {
        let scorer = Arc::new(StubScorer::scripted(vec![vec![0.2, 0.9], vec![0.5]]));
        let matcher = AdvisorMatcher::new(scorer.clone());

        let ranking = matcher
            .suggest("  aprendizado profundo  ", &resumes())
            .await
            .unwrap();

        assert_eq!(ranking.scores["Ada Almeida"], 90.0);
        assert_eq!(ranking.scores["Bento Silva"], 50.0);
        assert_eq!(ranking.best.iter().collect::<Vec<_>>(), vec!["Ada Almeida"]);
        // Trimmed topic reaches the scorer.
        assert_eq!(scorer.topics(), vec!["aprendizado profundo"; 2]);
    }

    #[tokio::test]
    async fn empty_topic_wins_over_a_malformed_resume() {
        let matcher = AdvisorMatcher::new(Arc::new(StubScorer::default()));
        let bad = vec![ResumeFile::new("bad.xml", b"<not-closed".to_vec())];

        let err = matcher.suggest("   ", &bad).await.unwrap_err();

        assert!(matches!(err, MatchError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn malformed_resume_is_reported_with_its_name() {
        let matcher = AdvisorMatcher::new(Arc::new(StubScorer::default()));
        let bad = vec![ResumeFile::new("bad.xml", b"<not-closed".to_vec())];

        let err = matcher.suggest("topic", &bad).await.unwrap_err();

        assert!(err.to_string().contains("bad.xml"));
    }

    #[tokio::test]
    async fn no_resumes_means_an_empty_ranking() {
        let scorer = Arc::new(StubScorer::default());
        let matcher = AdvisorMatcher::new(scorer.clone());

        let ranking = matcher.suggest("topic", &[]).await.unwrap();

        assert!(ranking.is_empty());
        assert!(scorer.topics().is_empty());
    }

    #[tokio::test]
    async fn suggest_from_dir_loads_and_ranks() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("almeida.xml"), ALMEIDA).unwrap();
        std::fs::write(dir.path().join("silva.xml"), SILVA).unwrap();

        let scorer = Arc::new(StubScorer::scripted(vec![vec![0.2, 0.9], vec![0.5]]));
        let matcher = AdvisorMatcher::new(scorer);

        let ranking = matcher
            .suggest_from_dir("sistemas distribuidos", dir.path())
            .await
            .unwrap();

        assert_eq!(ranking.scores.len(), 2);
        assert_eq!(ranking.best.iter().collect::<Vec<_>>(), vec!["Ada Almeida"]);
    }
}
