#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    use crate::config::Config;
    use crate::knowledge::{Document, KnowledgeLookup, LookupOutcome};
    use crate::pipeline::context::PipelineContext;
    use crate::pipeline::research::execute;
    use crate::pipeline::research::strategist::{
        ResearchStrategist, primary_query, refinement_query,
    };
    use crate::pipeline::research::types::QueryKind;
    use crate::pipeline::types::{AnomalyKind, Diagnosis};

    use crate::pipeline::types::AnomalyKind::{ExcessiveMoisture, NitrogenDeficiency};

    const REFINEMENT: &str = "corn nitrogen deficiency heavy rainfall leaching";

    /// 记录所有检索语句，并按给定方式应答
    struct RecordingLookup {
        queries: Mutex<Vec<String>>,
        respond: fn(&str) -> LookupOutcome,
    }

    impl RecordingLookup {
        fn new(respond: fn(&str) -> LookupOutcome) -> Arc<Self> {
            Arc::new(Self {
                queries: Mutex::new(Vec::new()),
                respond,
            })
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl KnowledgeLookup for RecordingLookup {
        async fn search(&self, query: &str, _max_results: usize) -> LookupOutcome {
            self.queries.lock().unwrap().push(query.to_string());
            (self.respond)(query)
        }
    }

    fn echo(query: &str) -> LookupOutcome {
        LookupOutcome::Hits(vec![Document::new(format!("doc for {}", query), "")])
    }

    fn empty(_query: &str) -> LookupOutcome {
        LookupOutcome::Hits(vec![])
    }

    fn same_document(_query: &str) -> LookupOutcome {
        LookupOutcome::Hits(vec![Document::new("Field Guide", "body")])
    }

    fn unavailable(query: &str) -> LookupOutcome {
        LookupOutcome::Fallback {
            reason: "offline".to_string(),
            documents: vec![Document::bulletin(query)],
        }
    }

    fn strategist(lookup: &Arc<RecordingLookup>) -> ResearchStrategist {
        ResearchStrategist::new(lookup.clone(), 3)
    }

    #[test]
    fn test_primary_query_format() {
        assert_eq!(
            primary_query("corn", NitrogenDeficiency),
            "corn Nitrogen Deficiency detected across multiple zones treatments"
        );
        assert_eq!(
            primary_query("wheat", ExcessiveMoisture),
            "wheat Excessive Soil Moisture detected treatments"
        );
    }

    #[test]
    fn test_refinement_query_rule() {
        let both = [NitrogenDeficiency, ExcessiveMoisture];
        assert_eq!(
            refinement_query("corn", NitrogenDeficiency, &both).as_deref(),
            Some(REFINEMENT)
        );
        assert_eq!(refinement_query("corn", ExcessiveMoisture, &both), None);
        assert_eq!(
            refinement_query("corn", NitrogenDeficiency, &[NitrogenDeficiency]),
            None
        );
    }

    #[tokio::test]
    async fn test_no_anomalies_issues_no_queries() {
        let lookup = RecordingLookup::new(echo);
        let findings = strategist(&lookup).research(&[], "corn").await;

        assert!(findings.is_empty());
        assert!(findings.queries.is_empty());
        assert!(lookup.queries().is_empty());
    }

    #[tokio::test]
    async fn test_single_nitrogen_anomaly_has_no_refinement() {
        let lookup = RecordingLookup::new(echo);
        let findings = strategist(&lookup)
            .research(&[NitrogenDeficiency], "corn")
            .await;

        assert_eq!(
            lookup.queries(),
            vec!["corn Nitrogen Deficiency detected across multiple zones treatments"]
        );
        assert_eq!(findings.refinement_count(), 0);
        assert_eq!(findings.len(), 1);
    }

    #[tokio::test]
    async fn test_compound_condition_triggers_refinement_after_primary() {
        let lookup = RecordingLookup::new(echo);
        let findings = strategist(&lookup)
            .research(&[NitrogenDeficiency, ExcessiveMoisture], "corn")
            .await;

        let expected = vec![
            "corn Nitrogen Deficiency detected across multiple zones treatments".to_string(),
            REFINEMENT.to_string(),
            "corn Excessive Soil Moisture detected treatments".to_string(),
        ];
        assert_eq!(lookup.queries(), expected);

        let titles: Vec<String> = findings.documents.iter().map(|d| d.title.clone()).collect();
        let expected_titles: Vec<String> = expected.iter().map(|q| format!("doc for {}", q)).collect();
        assert_eq!(titles, expected_titles);

        assert_eq!(findings.queries[1].kind, QueryKind::Refinement);
        assert_eq!(findings.queries[1].anomaly, NitrogenDeficiency);
    }

    #[tokio::test]
    async fn test_refinement_checks_full_anomaly_set() {
        let lookup = RecordingLookup::new(echo);
        strategist(&lookup)
            .research(&[ExcessiveMoisture, NitrogenDeficiency], "corn")
            .await;

        assert_eq!(
            lookup.queries(),
            vec![
                "corn Excessive Soil Moisture detected treatments".to_string(),
                "corn Nitrogen Deficiency detected across multiple zones treatments".to_string(),
                REFINEMENT.to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_refinement_count_matches_rule() {
        let cases: Vec<(Vec<AnomalyKind>, usize)> = vec![
            (vec![], 0),
            (vec![NitrogenDeficiency], 0),
            (vec![ExcessiveMoisture], 0),
            (vec![NitrogenDeficiency, ExcessiveMoisture], 1),
            (vec![ExcessiveMoisture, NitrogenDeficiency], 1),
        ];

        for (anomalies, refinements) in cases {
            let lookup = RecordingLookup::new(echo);
            let findings = strategist(&lookup).research(&anomalies, "corn").await;

            let issued = lookup.queries().iter().filter(|q| q.as_str() == REFINEMENT).count();
            assert_eq!(issued, refinements, "anomalies: {:?}", anomalies);
            assert_eq!(findings.refinement_count(), refinements);
            assert!(lookup.queries().len() <= 2 * anomalies.len());
        }
    }

    #[tokio::test]
    async fn test_empty_results_are_valid() {
        let lookup = RecordingLookup::new(empty);
        let findings = strategist(&lookup)
            .research(&[NitrogenDeficiency, ExcessiveMoisture], "corn")
            .await;

        assert!(findings.is_empty());
        assert_eq!(findings.queries.len(), 3);
        assert!(findings.queries.iter().all(|q| q.documents == 0));
    }

    #[tokio::test]
    async fn test_duplicates_are_kept() {
        let lookup = RecordingLookup::new(same_document);
        let findings = strategist(&lookup)
            .research(&[NitrogenDeficiency, ExcessiveMoisture], "corn")
            .await;

        assert_eq!(findings.len(), 3);
        assert!(findings.documents.iter().all(|d| d.title == "Field Guide"));
    }

    #[tokio::test]
    async fn test_fallback_documents_are_used() {
        let lookup = RecordingLookup::new(unavailable);
        let findings = strategist(&lookup)
            .research(&[ExcessiveMoisture], "corn")
            .await;

        assert_eq!(findings.len(), 1);
        assert!(findings.queries[0].fallback);
        assert_eq!(
            findings.documents[0].title,
            "Agricultural Bulletin: corn Excessive Soil Moisture detected treatments"
        );
    }

    #[tokio::test]
    async fn test_execute_against_builtin_corpus() {
        let context = PipelineContext::new(Config::default()).unwrap();
        let diagnosis = Diagnosis {
            avg_nitrogen: 84.25,
            avg_moisture: 55.0,
            anomalies: vec![NitrogenDeficiency, ExcessiveMoisture],
        };

        let findings = execute(&context, &diagnosis).await;

        let titles: Vec<&str> = findings.documents.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Management of Nitrogen Deficiency in Corn",
                "Identifying Nutrient Deficiencies in Corn",
                "Wet Season Corn Nitrogen Management",
                "Nitrogen Loss from Heavy Rains",
                "Agricultural Bulletin: corn Excessive Soil Moisture detected treatments",
            ]
        );
    }
}
