//! Interactive conventional commit authoring.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::Config;
use crate::conventional::{
    format_message, is_valid_scope, suggest_type, validate_message, CommitType, ValidationError,
};
use crate::git::{GitRepository, GitRunner};
use crate::prompt::Prompter;
use crate::workflow::staged::StagedCheck;
use crate::workflow::{FlowOutcome, RULE_WIDTH};

/// Staged files listed in the review before the remainder is summarized.
const REVIEW_FILE_LIMIT: usize = 10;

/// Steps of the commit flow.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CommitState {
    Start,
    ValidateStaged,
    OfferUnstage(Vec<String>),
    SelectType,
    SelectScope,
    SelectDescription,
    ValidateMessage,
    ReviewAndConfirm,
    ExecuteCommit,
    End,
    Cancelled,
    Aborted,
}

/// Answers gathered so far.
#[derive(Debug, Default)]
struct CommitDraft {
    staged: Vec<String>,
    suggested: Option<CommitType>,
    commit_type: String,
    scope: Option<String>,
    description: String,
    message: String,
}

/// Walks the operator from staged changes to a validated commit.
pub struct CommitFlow<'a, G: GitRunner, R, W> {
    repo: &'a GitRepository<G>,
    config: &'a Config,
    prompter: &'a mut Prompter<R, W>,
    draft: CommitDraft,
}

impl<'a, G, R, W> CommitFlow<'a, G, R, W>
where
    G: GitRunner,
    R: BufRead,
    W: Write,
{
    /// Creates a flow over `repo` that talks through `prompter`.
    pub fn new(
        repo: &'a GitRepository<G>,
        config: &'a Config,
        prompter: &'a mut Prompter<R, W>,
    ) -> Self {
        Self {
            repo,
            config,
            prompter,
            draft: CommitDraft::default(),
        }
    }

    /// Runs the flow to completion, cancellation or abort.
    pub fn run(mut self) -> Result<FlowOutcome> {
        let mut state = CommitState::Start;

        loop {
            debug!(?state, "commit flow");
            state = match state {
                CommitState::Start => self.start()?,
                CommitState::ValidateStaged => self.validate_staged()?,
                CommitState::OfferUnstage(files) => self.offer_unstage(&files)?,
                CommitState::SelectType => self.select_type()?,
                CommitState::SelectScope => self.select_scope()?,
                CommitState::SelectDescription => self.select_description()?,
                CommitState::ValidateMessage => self.validate()?,
                CommitState::ReviewAndConfirm => self.review()?,
                CommitState::ExecuteCommit => self.execute()?,
                CommitState::End => return Ok(FlowOutcome::Completed),
                CommitState::Cancelled => return Ok(FlowOutcome::Cancelled),
                CommitState::Aborted => return Ok(FlowOutcome::Aborted),
            };
        }
    }

    fn start(&mut self) -> Result<CommitState> {
        self.prompter.say("🚀 Conventional Commit Helper")?;
        self.prompter.say("=".repeat(RULE_WIDTH))?;
        Ok(CommitState::ValidateStaged)
    }

    fn validate_staged(&mut self) -> Result<CommitState> {
        let check = StagedCheck::run(self.repo, self.config)?;
        check.report(self.prompter)?;

        if check.staged.is_empty() {
            return Ok(CommitState::Aborted);
        }
        if !check.ignored.is_empty() {
            return Ok(CommitState::OfferUnstage(check.ignored));
        }

        self.draft.staged = check.staged;
        Ok(CommitState::SelectType)
    }

    fn offer_unstage(&mut self, files: &[String]) -> Result<CommitState> {
        if !self
            .prompter
            .confirm("🔧 Automatically unstage ignored files?")?
        {
            self.prompter
                .say("❌ Please unstage ignored files manually")?;
            return Ok(CommitState::Aborted);
        }

        self.repo.unstage(files)?;
        self.prompter.say("✅ Unstaged ignored files")?;
        Ok(CommitState::ValidateStaged)
    }

    fn suggestion(&mut self) -> Result<CommitType> {
        if let Some(suggested) = self.draft.suggested {
            return Ok(suggested);
        }

        let repo = self.repo;
        let suggested = suggest_type(&self.draft.staged, || repo.staged_diff())?;
        self.draft.suggested = Some(suggested);
        Ok(suggested)
    }

    fn select_type(&mut self) -> Result<CommitState> {
        let suggested = self.suggestion()?;
        let codes: Vec<String> = self
            .config
            .type_codes()
            .into_iter()
            .map(String::from)
            .collect();

        self.prompter.say("")?;
        self.prompter
            .say(format!("💡 Suggested type: {suggested}"))?;
        self.prompter.say("📝 Available types:")?;
        for (i, code) in codes.iter().enumerate() {
            let category = self.config.category_for(code);
            let marker = if code == suggested.as_str() {
                " (suggested)"
            } else {
                ""
            };
            self.prompter
                .say(format!("  {:>2}. {code:<10} - {category}{marker}", i + 1))?;
        }

        let Some(choice) = self
            .prompter
            .ask(&format!("\nSelect commit type [1-{}] or enter custom: ", codes.len()))?
        else {
            return Ok(CommitState::Cancelled);
        };

        let selected = if choice.is_empty() {
            Some(suggested.as_str().to_string())
        } else if let Ok(index) = choice.parse::<usize>() {
            index
                .checked_sub(1)
                .and_then(|i| codes.get(i))
                .cloned()
        } else {
            codes.iter().find(|code| **code == choice).cloned()
        };

        match selected {
            Some(commit_type) => {
                self.draft.commit_type = commit_type;
                Ok(CommitState::SelectScope)
            }
            None => {
                self.prompter
                    .say(format!("❌ Unknown commit type: {choice}"))?;
                Ok(CommitState::SelectType)
            }
        }
    }

    fn select_scope(&mut self) -> Result<CommitState> {
        let question = if self.config.require_scope {
            "🎯 Scope (required): "
        } else {
            "🎯 Scope (optional, press Enter to skip): "
        };
        let Some(scope) = self.prompter.ask(question)? else {
            return Ok(CommitState::Cancelled);
        };

        self.draft.scope = (!scope.is_empty()).then(|| scope.to_lowercase());

        // A scope re-entered after a failed validation keeps the description.
        if self.draft.description.is_empty() {
            Ok(CommitState::SelectDescription)
        } else {
            self.compose();
            Ok(CommitState::ValidateMessage)
        }
    }

    fn select_description(&mut self) -> Result<CommitState> {
        let Some(description) = self
            .prompter
            .ask("📄 Description (imperative, lowercase): ")?
        else {
            return Ok(CommitState::Cancelled);
        };

        if description.is_empty() {
            self.prompter.say("❌ Description cannot be empty")?;
            return Ok(CommitState::SelectDescription);
        }

        self.draft.description = description;
        self.compose();
        Ok(CommitState::ValidateMessage)
    }

    fn compose(&mut self) {
        self.draft.message = format_message(
            &self.draft.commit_type,
            self.draft.scope.as_deref(),
            &self.draft.description,
        );
    }

    fn validate(&mut self) -> Result<CommitState> {
        let Err(reason) = validate_message(&self.draft.message, self.config) else {
            return Ok(CommitState::ReviewAndConfirm);
        };

        self.prompter.say(format!("❌ {reason}"))?;
        self.prompter
            .say(format!("   Generated: {}", self.draft.message))?;

        if !self.prompter.confirm("   Try again?")? {
            return Ok(CommitState::Aborted);
        }

        let scope_at_fault = match reason {
            ValidationError::ScopeRequired => true,
            ValidationError::FormatMismatch => self
                .draft
                .scope
                .as_deref()
                .is_some_and(|scope| !is_valid_scope(scope)),
            ValidationError::TooLong { .. } | ValidationError::NotLowercase => false,
        };

        if scope_at_fault {
            Ok(CommitState::SelectScope)
        } else {
            self.draft.description.clear();
            Ok(CommitState::SelectDescription)
        }
    }

    fn review(&mut self) -> Result<CommitState> {
        let staged = &self.draft.staged;

        self.prompter.say("")?;
        self.prompter.say("=".repeat(RULE_WIDTH))?;
        self.prompter.say("📋 Commit Preview:")?;
        self.prompter.say(format!("   {}", self.draft.message))?;
        self.prompter.say("")?;
        self.prompter
            .say(format!("📁 Files to commit ({}):", staged.len()))?;
        for file in staged.iter().take(REVIEW_FILE_LIMIT) {
            self.prompter.say(format!("   - {file}"))?;
        }
        if staged.len() > REVIEW_FILE_LIMIT {
            self.prompter.say(format!(
                "   ... and {} more",
                staged.len() - REVIEW_FILE_LIMIT
            ))?;
        }
        self.prompter.say("=".repeat(RULE_WIDTH))?;

        if self.prompter.confirm("\n✅ Commit with this message?")? {
            Ok(CommitState::ExecuteCommit)
        } else {
            self.prompter.say("❌ Commit cancelled")?;
            Ok(CommitState::Cancelled)
        }
    }

    fn execute(&mut self) -> Result<CommitState> {
        let output = self
            .repo
            .commit(&self.draft.message)
            .with_context(|| format!("Failed to commit '{}'", self.draft.message))?;

        let output = output.trim();
        if !output.is_empty() {
            self.prompter.say(output)?;
        }
        self.prompter.say("✅ Commit successful!")?;
        info!(message = %self.draft.message, "created commit");
        Ok(CommitState::End)
    }
}
