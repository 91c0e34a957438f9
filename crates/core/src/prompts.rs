//! Prompt templates for car-domain conversation, vision, SQL, and RAG.
//!
//! The reasoning system prompt is assembled from the tool registry at
//! wiring time, so the advertised tool set always matches what the agent
//! can actually dispatch.

/// Prompt for analyzing car images with a vision model.
pub const VISION_PROMPT: &str = "\
You are a highly skilled and professional assistant specializing exclusively in the buying \
and selling of cars. You are provided with an image of a car. Identify key details such as \
make, model, year, color, body type (SUV, sedan, etc.), and estimated condition. Offer \
valuable insights that would assist in buying or selling this car. Ensure your answer is \
concise and does not exceed 50 words. If the image is not related to a car, reply with: \
\"I am sorry, but I can only assist with car-related images. I specialize in the automotive \
domain.\" If uncertain about any details, respond with: \"I don't know.\"";

/// System prompt for the generic car-chat tool.
pub const CAR_CHAT_SYSTEM_PROMPT: &str = "\
You are a highly knowledgeable and professional assistant specializing in the buying and \
selling of cars. Your expertise includes evaluating car values, negotiating deals, providing \
market insights, and guiding clients through the car buying or selling process. Provide \
brief, clear answers to car-related questions, answer in the same language as the user's \
query, and avoid discussing topics outside the automotive domain.";

/// System prompt for RAG answer synthesis.
pub const RAG_SYSTEM_PROMPT: &str = "\
You will receive the user's query along with search results retrieved from our structured \
car data database. Your task is to integrate this retrieved information to generate a \
precise and informative answer. Ensure that your response is written in the same language \
as the user's query, is concise, and remains strictly within the automotive domain. If the \
retrieved documents do not provide enough context, kindly indicate that additional details \
are required.";

/// User-side RAG prompt wrapping the query and retrieved documents.
pub fn rag_user_prompt(message: &str) -> String {
    format!(
        "You are an automotive assistant tasked with generating a response based on the \
documents provided from our car data repository. Analyze the following documents in the \
context of the user's query and craft a clear, concise, and accurate answer grounded in \
them. If the documents do not yield sufficient information, apologize and indicate that \
further details may be needed.\n\nUser query and provided documents:\n{message}"
    )
}

/// Prompt instructing the model to emit exactly one SQL query for a question.
pub fn sql_query_prompt(dialect: &str, schema: &str, question: &str) -> String {
    format!(
        "You are an expert {dialect} analyst. Given the database schema below, write a \
single syntactically correct {dialect} query that answers the user's question. Return ONLY \
the SQL query, with no explanation and no markdown formatting.\n\nSchema:\n{schema}\n\n\
Question: {question}\nSQLQuery:"
    )
}

/// Prompt synthesizing a natural-language answer from a SQL round-trip.
pub fn sql_answer_prompt(question: &str, query: &str, result: &str) -> String {
    format!(
        "Given the following user question, corresponding SQL query, and SQL result, \
answer the user question.\n\nQuestion: {question}\nSQL Query: {query}\nSQL Result: {result}\n\
Answer:"
    )
}

/// Build the ReAct instruction prompt, enumerating the given tools.
///
/// `tools` pairs each tool name with its usage guidance, in the order the
/// registry was populated.
pub fn react_system_prompt(tools: &[(&str, &str)]) -> String {
    let mut prompt = String::from(
        "You are an intelligent agent operating in a ReAct style:\n\
1) You start with a Thought: describing your reasoning about the question.\n\
2) If you need additional information or need to execute a tool, use \
Action: <tool_name>: <input>, then output \"PAUSE\".\n\
3) The tool result will come back as Observation.\n\
4) Repeat as needed until you reach a final answer.\n\
5) When you have your final answer for the user, output it as: Answer: <text>.\n\n\
Available tools (Actions) are:\n",
    );

    for (name, usage) in tools {
        prompt.push_str(&format!("- {name}: {usage}\n\n"));
    }

    prompt.push_str(
        "Important:\n\
- Do not reveal Thought, Action, or Observation in the final user-facing output.\n\
- Only the content after \"Answer:\" is given to the user.\n\n\
Now handle the user's message with a ReAct approach.",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn react_prompt_enumerates_tools() {
        let tools = vec![
            ("handle_sql_mode", "Use for database lookups."),
            ("handle_normal_chat_mode", "Use for general car chat."),
        ];
        let prompt = react_system_prompt(&tools);
        assert!(prompt.contains("- handle_sql_mode: Use for database lookups."));
        assert!(prompt.contains("- handle_normal_chat_mode:"));
        // SQL guidance must come before chat guidance (registration order).
        let sql_pos = prompt.find("handle_sql_mode").unwrap();
        let chat_pos = prompt.find("handle_normal_chat_mode").unwrap();
        assert!(sql_pos < chat_pos);
    }

    #[test]
    fn react_prompt_describes_protocol() {
        let prompt = react_system_prompt(&[]);
        assert!(prompt.contains("Action: <tool_name>: <input>"));
        assert!(prompt.contains("Answer: <text>"));
    }

    #[test]
    fn sql_answer_prompt_embeds_all_parts() {
        let p = sql_answer_prompt("cheapest BMW?", "SELECT MIN(price) FROM cars", "12000");
        assert!(p.contains("cheapest BMW?"));
        assert!(p.contains("SELECT MIN(price)"));
        assert!(p.contains("12000"));
        assert!(p.trim_end().ends_with("Answer:"));
    }
}
