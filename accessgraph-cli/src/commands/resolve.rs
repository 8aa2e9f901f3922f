use super::{group_set, join, Context};
use std::fmt::Write;

pub async fn run(ctx: &Context, groups: &[String]) -> anyhow::Result<String> {
    let direct = group_set(groups);
    let resolver = ctx.resolver();
    let inherited = resolver.propagate_inheritance(&direct).await?;
    let effective = resolver.effective_groups(&direct).await?;

    let mut out = String::new();
    writeln!(out, "direct:    {}", join(&direct))?;
    writeln!(out, "inherited: {}", join(&inherited))?;
    writeln!(out, "effective: {}", join(&effective))?;
    Ok(out)
}
