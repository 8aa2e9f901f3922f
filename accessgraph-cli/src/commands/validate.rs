use super::Context;

/// One line per finding; empty when the catalog is clean
pub fn run(ctx: &Context) -> Vec<String> {
    ctx.catalog.validate().iter().map(|finding| format!("warning: {}", finding)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;

    #[test]
    fn clean_catalog_has_no_findings() {
        let mut ctx = fixtures::context();
        ctx.catalog.groups.groups.push(accessgraph_core::catalog::GroupDef::new("QSR", &[]));
        assert!(run(&ctx).is_empty());
    }

    #[test]
    fn dangling_requirement_is_reported() {
        let ctx = fixtures::context();
        assert_eq!(run(&ctx), vec!["warning: app instance 'qsr_pricing' requires undeclared group 'QSR'"]);
    }
}
