#![allow(dead_code)]
use std::net::Ipv4Addr;
use stub_relay_domain::{AnswerRecord, Header, Question, RecordType, CLASS_IN, QUESTION_NAME_OFFSET};

/// Assembles a complete message: header, one question and A answers that
/// point back at the question name.
pub struct MessageBuilder {
    header: Header,
    question: Option<Question>,
    answers: Vec<AnswerRecord>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self {
            header: Header {
                id: 0x1234,
                recursion_desired: true,
                ..Header::default()
            },
            question: None,
            answers: Vec::new(),
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.header.id = id;
        self
    }

    pub fn response(mut self) -> Self {
        self.header.query_response = true;
        self.header.recursion_available = true;
        self
    }

    pub fn question(mut self, name: &str, record_type: RecordType) -> Self {
        self.question = Some(Question::new(name, record_type.to_u16(), CLASS_IN));
        self
    }

    pub fn answer_a(mut self, name: &str, ttl: u32, addr: &str) -> Self {
        let addr: Ipv4Addr = addr.parse().unwrap();
        self.answers.push(AnswerRecord::a(name, ttl, addr));
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        self.header.question_count = self.question.is_some() as u16;
        self.header.answer_count = self.answers.len() as u16;

        let mut buf = self.header.encode().to_vec();
        if let Some(question) = &self.question {
            buf.extend(question.encode().unwrap());
        }
        for answer in &self.answers {
            buf.extend(answer.encode_with_pointer(QUESTION_NAME_OFFSET).unwrap());
        }
        buf
    }
}
