pub mod advisor;
pub mod analyst;
pub mod reporter;
pub mod researcher;
pub mod runtime;
pub mod tools;

use chrono::{DateTime, Local};

use crate::config::{ModelRef, ModelsConfig, TeamConfig};
use tools::MarketTool;

pub use runtime::AgentRunner;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AgentRole {
    Researcher,
    Analyst,
    Advisor,
    Reporter,
}

impl AgentRole {
    /// The fixed collaboration order.
    pub const PIPELINE: [AgentRole; 4] = [
        AgentRole::Researcher,
        AgentRole::Analyst,
        AgentRole::Advisor,
        AgentRole::Reporter,
    ];

    pub fn descriptor(self, model: ModelRef) -> AgentDescriptor {
        match self {
            AgentRole::Researcher => researcher::descriptor(model),
            AgentRole::Analyst => analyst::descriptor(model),
            AgentRole::Advisor => advisor::descriptor(model),
            AgentRole::Reporter => reporter::descriptor(model),
        }
    }

    /// What this member is asked to do with the query and earlier findings.
    pub fn task(self) -> &'static str {
        match self {
            AgentRole::Researcher => {
                "Gather all relevant market data, stock information, and news for this query."
            }
            AgentRole::Analyst => {
                "Interpret the research below and identify trends, patterns, and insights."
            }
            AgentRole::Advisor => {
                "Formulate specific investment recommendations based on the research and analysis below."
            }
            AgentRole::Reporter => {
                "Compile everything below into the final investment report."
            }
        }
    }
}

/// Static configuration of one team member.
#[derive(Clone, Debug)]
pub struct AgentDescriptor {
    pub role: AgentRole,
    pub name: &'static str,
    pub role_text: &'static str,
    pub instructions: &'static [&'static str],
    pub model: ModelRef,
    pub tools: Vec<MarketTool>,
}

impl AgentDescriptor {
    /// Build the system prompt: identity, own instructions, the team lead's
    /// instructions, then formatting and clock hints.
    pub fn system_prompt(&self, team: &TeamConfig, team_instructions: &[&str], now: DateTime<Local>) -> String {
        let mut prompt = format!("You are the {}.\nYour role: {}\n\n## Instructions\n", self.name, self.role_text);
        push_instructions(&mut prompt, self.instructions);

        if !team_instructions.is_empty() {
            prompt.push_str(&format!("\n## Team\nYou are a member of the {}.\n", team.name));
            push_instructions(&mut prompt, team_instructions);
        }

        if !self.tools.is_empty() {
            let names: Vec<&str> = self.tools.iter().map(|t| t.name()).collect();
            prompt.push_str(&format!("\nAvailable tools: {}\n", names.join(", ")));
        }

        if team.markdown {
            prompt.push_str("\nUse markdown to format your answers.\n");
        }
        if team.add_datetime {
            prompt.push_str(&format!("\nThe current time is {}.\n", now.format("%Y-%m-%d %H:%M:%S %:z")));
        }

        prompt
    }
}

fn push_instructions(prompt: &mut String, lines: &[&str]) {
    for line in lines {
        if line.is_empty() || line.starts_with(char::is_whitespace) || line.starts_with('#') {
            prompt.push_str(line);
        } else {
            prompt.push_str("- ");
            prompt.push_str(line);
        }
        prompt.push('\n');
    }
}

/// The four members in pipeline order, each on its configured model.
pub fn build_members(models: &ModelsConfig) -> Vec<AgentDescriptor> {
    AgentRole::PIPELINE
        .into_iter()
        .map(|role| role.descriptor(models.for_role(role).clone()))
        .collect()
}
