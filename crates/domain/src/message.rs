use crate::header::rcode_to_status;
use crate::record::AnswerRecord;
use crate::{DomainError, Header, Question, RecordType};
use std::fmt;
use std::net::Ipv4Addr;

/// Decodes every record of the answer section of `message`.
///
/// All questions are walked first (names may be compressed), then
/// `answer_count` records are read back to back.
pub fn answers(message: &[u8]) -> Result<Vec<AnswerRecord>, DomainError> {
    let header = Header::decode(message)?;
    let mut offset = skip_questions(message, &header)?;

    let mut records = Vec::with_capacity(usize::from(header.answer_count));
    for _ in 0..header.answer_count {
        let (record, next) = AnswerRecord::decode(message, offset)?;
        records.push(record);
        offset = next;
    }

    Ok(records)
}

fn skip_questions(message: &[u8], header: &Header) -> Result<usize, DomainError> {
    let mut offset = Header::LEN;
    for _ in 0..header.question_count {
        let (_, next) = Question::decode_at(message, offset)?;
        offset = next;
    }
    Ok(offset)
}

/// A compact view of a response for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSummary {
    pub id: u16,
    pub response_code: u8,
    pub question: Option<Question>,
    pub answer_count: usize,
    pub addresses: Vec<Ipv4Addr>,
}

impl ResponseSummary {
    pub fn inspect(message: &[u8]) -> Result<Self, DomainError> {
        let header = Header::decode(message)?;
        let question = if header.question_count > 0 {
            Some(Question::decode_at(message, Header::LEN)?.0)
        } else {
            None
        };
        let records = answers(message)?;

        Ok(Self {
            id: header.id,
            response_code: header.response_code,
            question,
            answer_count: records.len(),
            addresses: records.iter().filter_map(AnswerRecord::ipv4).collect(),
        })
    }

    pub fn status(&self) -> &'static str {
        rcode_to_status(self.response_code)
    }
}

impl fmt::Display for ResponseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.question {
            Some(q) => write!(f, "{} {}", q.name, RecordType::from_u16(q.qtype))?,
            None => f.write_str("<no question>")?,
        }
        write!(f, " {} answers={}", self.status(), self.answer_count)?;
        for addr in &self.addresses {
            write!(f, " {}", addr)?;
        }
        Ok(())
    }
}
