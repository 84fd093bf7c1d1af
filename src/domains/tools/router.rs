//! Tool Router - builds the rmcp ToolRouter for the configured service.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::config::{Config, ServiceKind};

use super::definitions::{
    AddExpenseTool, AddTool, DeleteExpenseTool, EditExpenseTool, ListExpenseRangeTool,
    ListExpensesTool, RandomNumberTool, SummarizeTool,
};

/// Build the tool router with every tool of the configured service.
pub fn build_tool_router<S>(config: Arc<Config>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    match config.service {
        ServiceKind::Calculator => ToolRouter::new()
            .with_route(AddTool::create_route())
            .with_route(RandomNumberTool::create_route()),
        ServiceKind::Expense => ToolRouter::new()
            .with_route(AddExpenseTool::create_route(config.clone()))
            .with_route(ListExpensesTool::create_route(config.clone()))
            .with_route(ListExpenseRangeTool::create_route(config.clone()))
            .with_route(EditExpenseTool::create_route(config.clone()))
            .with_route(DeleteExpenseTool::create_route(config.clone()))
            .with_route(SummarizeTool::create_route(config)),
    }
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;

    struct TestServer {}

    fn names(router: &ToolRouter<TestServer>) -> Vec<String> {
        router
            .list_all()
            .iter()
            .map(|t| t.name.to_string())
            .collect()
    }

    #[test]
    fn test_calculator_router() {
        let router: ToolRouter<TestServer> =
            build_tool_router(Arc::new(Config::for_service(ServiceKind::Calculator)));
        let names = names(&router);
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"add".to_string()));
        assert!(names.contains(&"random_number".to_string()));
    }

    #[test]
    fn test_expense_router() {
        let router: ToolRouter<TestServer> =
            build_tool_router(Arc::new(Config::for_service(ServiceKind::Expense)));
        let names = names(&router);
        assert_eq!(names.len(), 6);
        for expected in [
            "add_expenses",
            "list_Expenses",
            "list_expense_in_range",
            "edit_expense",
            "delete_expense",
            "summarize",
        ] {
            assert!(names.contains(&expected.to_string()), "missing {}", expected);
        }
    }

    #[test]
    fn test_registry_matches_router() {
        for service in [ServiceKind::Calculator, ServiceKind::Expense] {
            let config = Arc::new(Config::for_service(service));
            let registry = ToolRegistry::new(config.clone());
            let registry_names = registry.tool_names();

            let router: ToolRouter<TestServer> = build_tool_router(config);
            let router_names = names(&router);

            assert_eq!(registry_names.len(), router_names.len());
            for name in registry_names {
                assert!(router_names.contains(&name.to_string()));
            }
        }
    }
}
