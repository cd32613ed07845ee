//! The `createCWLUser` mutation resolver.

use super::{DataSource, PipelineResolver};
use crate::context::PipelineContext;
use crate::errors::ResolverError;
use crate::stages::{CreateCognitoUserStep, PipelineStep, SendWelcomeEmailStep, SEND_WELCOME_EMAIL_KEY};
use std::sync::Arc;

/// Resolver name, matching the GraphQL mutation field.
pub const CREATE_CWL_USER_RESOLVER: &str = "createCWLUser";

/// Data sources used by the `createCWLUser` pipeline.
#[derive(Debug, Clone)]
pub struct CreateUserDataSources {
    /// User-provisioning function.
    pub cognito: Arc<dyn DataSource>,
    /// User table the persistence step writes to.
    pub persist: Arc<dyn DataSource>,
    /// Notification function.
    pub welcome_email: Arc<dyn DataSource>,
}

/// Copies `args.input.sendWelcomeEmail` into the stash.
///
/// The raw value is copied as-is so the welcome email step can apply its
/// strict `true` check to whatever the caller sent.
pub fn seed_create_user_stash(ctx: &mut PipelineContext) -> Result<(), ResolverError> {
    let flag = ctx
        .argument("input")
        .and_then(|input| input.get(SEND_WELCOME_EMAIL_KEY))
        .cloned();

    if let Some(flag) = flag {
        ctx.stash.insert(SEND_WELCOME_EMAIL_KEY, flag);
    }
    Ok(())
}

/// Builds the `createCWLUser` pipeline.
///
/// Steps run as Cognito provisioning, then `persist_step`, then the
/// conditional welcome email.
#[must_use]
pub fn create_user_resolver(
    persist_step: Arc<dyn PipelineStep>,
    sources: CreateUserDataSources,
) -> PipelineResolver {
    PipelineResolver::new(CREATE_CWL_USER_RESOLVER)
        .with_before(seed_create_user_stash)
        .with_step(Arc::new(CreateCognitoUserStep::new()), sources.cognito)
        .with_step(persist_step, sources.persist)
        .with_step(Arc::new(SendWelcomeEmailStep::new()), sources.welcome_email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::NoneDataSource;
    use crate::stages::{FnStep, StepRequest};
    use serde_json::json;

    #[test]
    fn test_seed_copies_raw_flag() {
        let mut ctx = PipelineContext::new(
            CREATE_CWL_USER_RESOLVER,
            json!({"input": {"sendWelcomeEmail": "yes"}}),
        );
        seed_create_user_stash(&mut ctx).unwrap();
        assert_eq!(ctx.stash.get(SEND_WELCOME_EMAIL_KEY), Some(&json!("yes")));
    }

    #[test]
    fn test_seed_leaves_stash_empty_without_flag() {
        let mut ctx = PipelineContext::new(CREATE_CWL_USER_RESOLVER, json!({"input": {}}));
        seed_create_user_stash(&mut ctx).unwrap();
        assert!(ctx.stash.is_empty());

        let mut ctx = PipelineContext::new(CREATE_CWL_USER_RESOLVER, json!({}));
        seed_create_user_stash(&mut ctx).unwrap();
        assert!(ctx.stash.is_empty());
    }

    #[test]
    fn test_resolver_step_order() {
        let persist: Arc<dyn PipelineStep> = Arc::new(FnStep::new(
            "persistUser",
            |_ctx| Ok(StepRequest::NoOp),
            |ctx, _outcome| Ok(ctx.prev_result().cloned().unwrap_or_default()),
        ));
        let none: Arc<dyn DataSource> = Arc::new(NoneDataSource);
        let resolver = create_user_resolver(
            persist,
            CreateUserDataSources {
                cognito: none.clone(),
                persist: none.clone(),
                welcome_email: none,
            },
        );

        assert_eq!(resolver.name(), "createCWLUser");
        assert_eq!(
            resolver.step_names(),
            vec!["createCognitoUser", "persistUser", "sendWelcomeEmail"]
        );
    }
}
