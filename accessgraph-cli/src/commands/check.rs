use super::{group_set, Context};

/// Whether the groups (plus their inheritance) may open `instance`
pub async fn run(ctx: &Context, groups: &[String], instance: &str) -> anyhow::Result<bool> {
    let resolver = ctx.resolver();
    let effective = resolver.effective_groups(&group_set(groups)).await?;
    let access = resolver.propagate_app_access(&effective).await?;

    if !ctx.catalog.to_auth_structure().instance_names().any(|name| name == instance) {
        log::warn!("App instance '{}' is not in the catalog", instance);
    }
    Ok(access.can_open(instance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;

    fn groups(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn inheritance_grants_access() {
        let ctx = fixtures::context();
        assert!(run(&ctx, &groups(&["leads"]), "planner_admin").await.unwrap());
        assert!(!run(&ctx, &groups(&["planners"]), "planner_admin").await.unwrap());
    }

    #[tokio::test]
    async fn superuser_opens_everything_in_catalog() {
        let ctx = fixtures::context();
        assert!(run(&ctx, &groups(&["superuser"]), "qsr_pricing").await.unwrap());
        assert!(!run(&ctx, &groups(&["superuser"]), "not_an_instance").await.unwrap());
    }
}
