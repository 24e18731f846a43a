//! DeFi Protocol Tools

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema};

use super::{format_usd, protocol_param};
use crate::service::ResearchService;

fn protocol_schema(name: &str, description: &str) -> ToolSchema {
    ToolSchema {
        name: name.into(),
        description: description.into(),
        parameters: vec![protocol_param()],
        category: Some("defi".into()),
        has_side_effects: false,
    }
}

/// Shared body of the protocol lookups that hand the agent the full payload.
/// `label` heads the output, `topic` names what failed.
async fn protocol_report(
    service: &ResearchService,
    tool: &str,
    call: &ToolCall,
    label: &str,
    topic: &str,
) -> CoreResult<ToolResult> {
    let protocol = call.required_str("protocol")?;

    match service.compute_protocol_metrics(protocol).await {
        Ok(metrics) => {
            let data = serde_json::to_value(&metrics)?;
            let output = format!(
                "{label} analysis for {protocol}: {}",
                serde_json::to_string_pretty(&data)?
            );
            Ok(ToolResult::success(tool, output).with_data(data))
        }
        Err(e) => Ok(ToolResult::failure(
            tool,
            format!("Error getting {topic} data for {protocol}: {e}"),
        )),
    }
}

/// Tool returning the normalized metrics plus the raw protocol payload
pub struct DefiProtocolDataTool {
    service: Arc<ResearchService>,
}

impl DefiProtocolDataTool {
    const NAME: &'static str = "defi_protocol_data";

    pub fn new(service: Arc<ResearchService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for DefiProtocolDataTool {
    fn schema(&self) -> ToolSchema {
        protocol_schema(
            Self::NAME,
            "Get DeFi protocol data from DefiLlama: TVL, 1d/7d TVL change and the full protocol profile.",
        )
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        protocol_report(&self.service, Self::NAME, call, "Protocol", "protocol").await
    }
}

/// Tool for yield analysis (APY sources, fee and revenue fields of the profile)
pub struct DefiYieldDataTool {
    service: Arc<ResearchService>,
}

impl DefiYieldDataTool {
    const NAME: &'static str = "defi_yield_data";

    pub fn new(service: Arc<ResearchService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for DefiYieldDataTool {
    fn schema(&self) -> ToolSchema {
        protocol_schema(
            Self::NAME,
            "Get DeFi yield data for a protocol: TVL trend plus the protocol profile for judging APY and fee sources",
        )
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        protocol_report(&self.service, Self::NAME, call, "Yield", "yield").await
    }
}

/// Tool for governance analysis (token, treasury and governance fields of the profile)
pub struct DefiGovernanceDataTool {
    service: Arc<ResearchService>,
}

impl DefiGovernanceDataTool {
    const NAME: &'static str = "defi_governance_data";

    pub fn new(service: Arc<ResearchService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for DefiGovernanceDataTool {
    fn schema(&self) -> ToolSchema {
        protocol_schema(
            Self::NAME,
            "Get DeFi governance data for a protocol: governance token, treasury and the protocol profile",
        )
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        protocol_report(&self.service, Self::NAME, call, "Governance", "governance").await
    }
}

/// Tool for risk analysis (audits, chains and TVL concentration of the profile)
pub struct DefiRiskDataTool {
    service: Arc<ResearchService>,
}

impl DefiRiskDataTool {
    const NAME: &'static str = "defi_risk_data";

    pub fn new(service: Arc<ResearchService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for DefiRiskDataTool {
    fn schema(&self) -> ToolSchema {
        protocol_schema(
            Self::NAME,
            "Get DeFi risk data for a protocol: audits, chain exposure, TVL trend and the protocol profile",
        )
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        protocol_report(&self.service, Self::NAME, call, "Risk", "risk").await
    }
}

/// Tool giving a one-line TVL summary
pub struct DefiTvlDataTool {
    service: Arc<ResearchService>,
}

impl DefiTvlDataTool {
    const NAME: &'static str = "defi_tvl_data";

    pub fn new(service: Arc<ResearchService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for DefiTvlDataTool {
    fn schema(&self) -> ToolSchema {
        protocol_schema(
            Self::NAME,
            "Get current TVL and its 1d/7d percentage change for a DeFi protocol",
        )
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let protocol = call.required_str("protocol")?;

        match self.service.compute_protocol_metrics(protocol).await {
            Ok(metrics) => {
                let output = format!(
                    "TVL analysis for {protocol}: Current TVL: {}, 1d change: {:.2}%, 7d change: {:.2}%",
                    format_usd(metrics.tvl),
                    metrics.tvl_change_1d,
                    metrics.tvl_change_7d
                );
                Ok(ToolResult::success(Self::NAME, output))
            }
            Err(e) => Ok(ToolResult::failure(
                Self::NAME,
                format!("Error getting TVL data for {protocol}: {e}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResearchConfig;
    use crate::source::MockMarketData;
    use serde_json::json;

    fn service(source: MockMarketData) -> Arc<ResearchService> {
        Arc::new(ResearchService::new(Arc::new(source), ResearchConfig::default()))
    }

    #[tokio::test]
    async fn test_protocol_data() {
        let tool = DefiProtocolDataTool::new(service(MockMarketData::new()));
        let call = ToolCall::new("defi_protocol_data").with_arg("protocol", "aave");

        let result = tool.execute(&call).await.unwrap();
        assert!(result.success);
        assert!(result.output.starts_with("Protocol analysis for aave: "));

        let data = result.data.unwrap();
        assert_eq!(data["protocol"], "aave");
        assert_eq!(data["protocol_data"]["category"], "Lending");
    }

    #[tokio::test]
    async fn test_tvl_summary() {
        let source = MockMarketData::new().with_protocol(
            "curve",
            json!({"tvl": 1_234_567.4, "change_1d": 2.5, "change_7d": -3.1}),
        );
        let tool = DefiTvlDataTool::new(service(source));
        let call = ToolCall::new("defi_tvl_data").with_arg("protocol", "curve");

        let result = tool.execute(&call).await.unwrap();
        assert_eq!(
            result.output,
            "TVL analysis for curve: Current TVL: $1,234,567, 1d change: 2.50%, 7d change: -3.10%"
        );
    }

    #[tokio::test]
    async fn test_yield_governance_risk_reports() {
        let service = service(MockMarketData::new());
        let tools: [(Box<dyn Tool>, &str); 3] = [
            (Box::new(DefiYieldDataTool::new(service.clone())), "Yield"),
            (Box::new(DefiGovernanceDataTool::new(service.clone())), "Governance"),
            (Box::new(DefiRiskDataTool::new(service)), "Risk"),
        ];

        for (tool, label) in tools {
            let call = ToolCall::new(tool.schema().name).with_arg("protocol", "lido");
            let result = tool.execute(&call).await.unwrap();
            assert!(result.success, "{}", result.output);
            assert!(result.output.starts_with(&format!("{label} analysis for lido: ")));

            let data = result.data.unwrap();
            assert_eq!(data["protocol"], "lido");
            assert!(data["protocol_data"].is_object());
        }
    }

    #[tokio::test]
    async fn test_report_errors_name_their_topic() {
        let service = service(MockMarketData::new());
        let cases: [(Box<dyn Tool>, &str); 3] = [
            (Box::new(DefiYieldDataTool::new(service.clone())), "yield"),
            (Box::new(DefiGovernanceDataTool::new(service.clone())), "governance"),
            (Box::new(DefiRiskDataTool::new(service)), "risk"),
        ];

        for (tool, topic) in cases {
            let call = ToolCall::new(tool.schema().name).with_arg("protocol", "nope");
            let result = tool.execute(&call).await.unwrap();
            assert!(!result.success);
            assert_eq!(
                result.output,
                format!("Error getting {topic} data for nope: Protocol 'nope' not found")
            );
        }
    }

    #[tokio::test]
    async fn test_upstream_error_is_passed_through() {
        let tool = DefiTvlDataTool::new(service(MockMarketData::new()));
        let call = ToolCall::new("defi_tvl_data").with_arg("protocol", "nope");

        let result = tool.execute(&call).await.unwrap();
        assert!(!result.success);
        assert_eq!(
            result.output,
            "Error getting TVL data for nope: Protocol 'nope' not found"
        );
    }
}
