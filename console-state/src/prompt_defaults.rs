//! Compiled-in default prompt templates.
//!
//! These are the values the "reset to default" actions restore; the server
//! may ship different templates, which is why the change detector compares
//! against both.

/// Chat: answer the next user turn from retrieved context.
pub const CHAT_CONTEXT_TEMPLATE: &str = "\
The following is a friendly conversation between a user and an AI assistant.
The assistant is talkative and provides lots of specific details from its context.
If the assistant does not know the answer to a question, it truthfully says it
does not know.

Here are the relevant documents for the context:

{context_str}

Instruction: Based on the above documents, provide a detailed answer for the user question below.
Answer \"don't know\" if not present in the document.
";

/// Chat: condense history plus follow-up into a standalone question.
pub const CHAT_CONDENSE_TEMPLATE: &str = "\
Given the following conversation between a user and an AI assistant and a follow up question from user,
rephrase the follow up question to be a standalone question.

Chat History:
{chat_history}
Follow Up Input: {question}
Standalone question:";

/// Query: answer from context only.
pub const QUERY_QA_TEMPLATE: &str = "\
Context information is below.
---------------------
{context_str}
---------------------
Given the context information and not prior knowledge, answer the query.
Query: {query_str}
Answer: ";

/// Query: refine an existing answer with additional context.
pub const QUERY_REFINE_TEMPLATE: &str = "\
The original query is as follows: {query_str}
We have provided an existing answer: {existing_answer}
We have the opportunity to refine the existing answer (only if needed) with some more context below.
------------
{context_msg}
------------
Given the new context, refine the original answer to better answer the query. If the context isn't useful, return the original answer.
Refined Answer: ";
