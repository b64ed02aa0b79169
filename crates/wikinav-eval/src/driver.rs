//! Drives models through benchmark games and scores their paths

use tokio_util::sync::CancellationToken;
use wikinav_core::path::STEP_SEPARATOR;
use wikinav_core::{
    ArticleTitle, BenchmarkCase, BenchmarkDataset, DifficultyTier, GamePath, LinkGraph,
    PathValidator, ValidationReport,
};
use wikinav_llm::{link_request, parse_link_answer, parse_path_answer, path_request, ModelClient};

use crate::config::EvalConfig;
use crate::context::ContextType;
use crate::error::{EvalError, EvalResult};
use crate::result::{ResultRow, INFERENCE_MODE};

/// Runs every configured model over a benchmark dataset.
///
/// Games are played one after another; each remote call is awaited before
/// the next one starts.
pub struct EvaluationDriver<'a, G: LinkGraph + ?Sized> {
    graph: &'a G,
    models: Vec<&'a dyn ModelClient>,
    config: EvalConfig,
    cancel: CancellationToken,
}

impl<'a, G: LinkGraph + ?Sized> EvaluationDriver<'a, G> {
    pub fn new(graph: &'a G, models: Vec<&'a dyn ModelClient>, config: EvalConfig) -> Self {
        Self {
            graph,
            models,
            config,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Play tier by tier, case by case, then context, then model
    pub async fn run(&self, dataset: &BenchmarkDataset) -> EvalResult<Vec<ResultRow>> {
        if self.models.is_empty() {
            return Err(EvalError::NoModels);
        }

        let mut rows = Vec::new();
        for (tier, cases) in dataset.tiers() {
            for (game_num, case) in cases.iter().take(self.config.games_per_tier).enumerate() {
                for context in &self.config.contexts {
                    for model in &self.models {
                        if self.cancel.is_cancelled() {
                            return Err(EvalError::Cancelled);
                        }
                        let row = self.play(tier, game_num, case, *context, *model).await?;
                        rows.push(row);
                    }
                }
            }
        }

        tracing::info!("Evaluation finished with {} results", rows.len());
        Ok(rows)
    }

    /// Play and score a single game
    pub async fn play(
        &self,
        tier: DifficultyTier,
        game_num: usize,
        case: &BenchmarkCase,
        context: ContextType,
        model: &dyn ModelClient,
    ) -> EvalResult<ResultRow> {
        let start = ArticleTitle::new(&case.start_node);
        let end = ArticleTitle::new(&case.end_node);
        tracing::info!(
            "{} #{}: {} -> {} with {} ({})",
            tier,
            game_num,
            start,
            end,
            model.version(),
            context
        );

        let mut path = GamePath::starting_at(start.clone());
        let played = if context.is_single_hop() {
            self.play_single_hop(&mut path, &end, model).await
        } else {
            self.play_multi_hop(&mut path, &start, &end, context, model).await
        };

        let report = match played {
            Ok(()) => {
                let report = PathValidator::new(self.graph)
                    .with_policy(self.config.validation_policy())
                    .validate(path.steps())
                    .await;
                if self.cancel.is_cancelled() {
                    return Err(EvalError::Cancelled);
                }
                report
            }
            Err(e) if e.is_cancelled() || self.cancel.is_cancelled() => {
                return Err(EvalError::Cancelled)
            }
            Err(e) => {
                tracing::warn!("{} #{} abandoned for {}: {}", tier, game_num, model.version(), e);
                ValidationReport::aborted()
            }
        };

        Ok(ResultRow {
            game_mode: tier,
            game_num,
            model_name: model.provider().to_string(),
            version_model: model.version().to_string(),
            type_context: context.label().to_string(),
            inference_mode: INFERENCE_MODE.to_string(),
            start_node: case.start_node.clone(),
            end_node: case.end_node.clone(),
            steps: path.join(STEP_SEPARATOR),
            errors: report.labels(),
            num_no_link: report.counts.no_link,
            num_no_page: report.counts.no_page,
            num_dis_page: report.counts.disambiguation,
            num_missing_page: report.counts.missing_page,
            complete_path: path.reaches(&end),
            avg_human_step_to_win: case.avg_human_step_to_win,
            human_paths: case.human_paths(),
        })
    }

    /// One call for the whole path; the answer replaces the path
    async fn play_multi_hop(
        &self,
        path: &mut GamePath,
        start: &ArticleTitle,
        end: &ArticleTitle,
        context: ContextType,
        model: &dyn ModelClient,
    ) -> EvalResult<()> {
        let request = path_request(start.as_str(), end.as_str());
        let answer = model.complete(&context.prompt(), &request).await?;
        *path = parse_path_answer(&answer).into_iter().collect();
        Ok(())
    }

    async fn play_single_hop(
        &self,
        path: &mut GamePath,
        end: &ArticleTitle,
        model: &dyn ModelClient,
    ) -> EvalResult<()> {
        let prompt = ContextType::Link.prompt();
        loop {
            let current = match path.last() {
                Some(current) => current.clone(),
                None => break,
            };
            if current.eq_ignore_case(end) || path.len() >= self.config.max_steps {
                break;
            }

            let Some(candidates) = self.graph.visible_links(&current, &path.visited()).await?
            else {
                tracing::info!("{} led to {}, which has no page", model.version(), current);
                break;
            };
            let request = link_request(current.as_str(), end.as_str(), &candidates);
            let answer = model.complete(&prompt, &request).await?;

            match parse_link_answer(&answer) {
                Some(choice) => {
                    tracing::debug!("{} chose {} from {}", model.version(), choice, current);
                    path.push(choice);
                }
                None => {
                    tracing::warn!("{} gave no choice at {}", model.version(), current);
                    break;
                }
            }
        }
        Ok(())
    }
}
