#![allow(dead_code)]

use std::net::Ipv4Addr;
use stub_relay_domain::{AnswerRecord, Header, Question, CLASS_IN, QUESTION_NAME_OFFSET};

pub fn query(id: u16, opcode: u8, name: &str) -> Vec<u8> {
    let header = Header {
        id,
        opcode,
        recursion_desired: true,
        question_count: 1,
        ..Header::default()
    };
    let mut buf = header.encode().to_vec();
    buf.extend(Question::new(name, 1, CLASS_IN).encode().unwrap());
    buf
}

/// An upstream-style reply with every header flag and count that the relay
/// rewrites set to a non-default value.
pub fn upstream_reply(id: u16, name: &str, addrs: &[Ipv4Addr]) -> Vec<u8> {
    let header = Header {
        id,
        query_response: true,
        authoritative_answer: true,
        truncation: true,
        recursion_desired: true,
        recursion_available: true,
        reserved: 3,
        question_count: 1,
        answer_count: addrs.len() as u16,
        authority_count: 2,
        additional_count: 1,
        ..Header::default()
    };
    let mut buf = header.encode().to_vec();
    buf.extend(Question::new(name, 1, CLASS_IN).encode().unwrap());
    for addr in addrs {
        buf.extend(
            AnswerRecord::a(name, 300, *addr)
                .encode_with_pointer(QUESTION_NAME_OFFSET)
                .unwrap(),
        );
    }
    buf
}
