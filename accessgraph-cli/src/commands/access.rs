use super::{group_set, join, Context};
use std::fmt::Write;

pub async fn run(ctx: &Context, groups: &[String]) -> anyhow::Result<String> {
    let resolver = ctx.resolver();
    let effective = resolver.effective_groups(&group_set(groups)).await?;
    let access = resolver.propagate_app_access(&effective).await?;

    let mut out = String::new();
    writeln!(out, "instances: {}", join(&access.instances))?;
    writeln!(out, "apps:      {}", join(&access.apps))?;
    writeln!(out, "sections:  {}", join(&access.sections))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;

    #[tokio::test]
    async fn lists_rolled_up_access() {
        let out = run(&fixtures::context(), &["planners".to_string()]).await.unwrap();
        assert_eq!(out, "instances: planner\napps:      planner\nsections:  planning\n");
    }

    #[tokio::test]
    async fn qsr_group_reaches_pricing() {
        let out = run(&fixtures::context(), &["QSR_NORTH".to_string()]).await.unwrap();
        assert!(out.contains("instances: qsr_pricing"));
        assert!(out.contains("sections:  pricing"));
    }
}
