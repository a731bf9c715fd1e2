//! Query-protocol XML unmarshalling
//!
//! The Auto Scaling Query API answers with documents like:
//!
//! ```xml
//! <DescribeAutoScalingGroupsResponse>
//!   <DescribeAutoScalingGroupsResult>
//!     <AutoScalingGroups>
//!       <member>
//!         <AutoScalingGroupName>web-asg</AutoScalingGroupName>
//!         <Instances>
//!           <member>
//!             <InstanceId>i-0a1</InstanceId>
//!             <LifecycleState>InService</LifecycleState>
//!             ...
//!           </member>
//!         </Instances>
//!       </member>
//!     </AutoScalingGroups>
//!   </DescribeAutoScalingGroupsResult>
//! </DescribeAutoScalingGroupsResponse>
//! ```
//!
//! Each reader below is entered right after the start tag of its element and
//! returns after consuming the matching end tag. Elements it does not know
//! are skipped whole.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{Error, Result};
use crate::group::GroupInstances;
use crate::instance::Instance;
use crate::launch_template::LaunchTemplateSpecification;

type XmlReader<'a> = Reader<&'a [u8]>;

fn new_reader(xml: &str) -> XmlReader<'_> {
    // Leaf text is kept verbatim; whitespace between elements never reaches read_text
    Reader::from_str(xml)
}

/// Element name without namespace prefix
fn local_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

/// Next child element of the current element, or `None` at its end tag.
/// The flag is true for self-closing elements.
fn next_child<'a>(
    reader: &mut XmlReader<'a>,
    parent: &str,
) -> Result<Option<(BytesStart<'a>, bool)>> {
    loop {
        match reader.read_event()? {
            Event::Start(e) => return Ok(Some((e, false))),
            Event::Empty(e) => return Ok(Some((e, true))),
            Event::End(_) => return Ok(None),
            Event::Eof => return Err(Error::UnexpectedEof(parent.to_string())),
            _ => {}
        }
    }
}

fn skip(reader: &mut XmlReader<'_>, start: &BytesStart<'_>, empty: bool) -> Result<()> {
    if !empty {
        log::debug!("Skipping element {}", local_name(start));
        reader.read_to_end(start.name())?;
    }
    Ok(())
}

/// Text content of a leaf element; self-closing elements read as ""
fn read_text(reader: &mut XmlReader<'_>, name: &str, empty: bool) -> Result<String> {
    let mut text = String::new();
    if empty {
        return Ok(text);
    }
    loop {
        match reader.read_event()? {
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
            Event::Start(e) => reader.read_to_end(e.name()).map(|_| ())?,
            Event::End(_) => return Ok(text),
            Event::Eof => return Err(Error::UnexpectedEof(name.to_string())),
            _ => {}
        }
    }
}

fn read_bool(reader: &mut XmlReader<'_>, name: &str, empty: bool) -> Result<bool> {
    let text = read_text(reader, name, empty)?;
    match text.as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::invalid_boolean(name, text)),
    }
}

fn read_launch_template(
    reader: &mut XmlReader<'_>,
    empty: bool,
) -> Result<LaunchTemplateSpecification> {
    let mut template = LaunchTemplateSpecification::new();
    if empty {
        return Ok(template);
    }
    while let Some((child, child_empty)) = next_child(reader, "LaunchTemplate")? {
        let name = local_name(&child);
        match name.as_str() {
            "LaunchTemplateId" => {
                template.set_launch_template_id(Some(read_text(reader, &name, child_empty)?))
            }
            "LaunchTemplateName" => {
                template.set_launch_template_name(Some(read_text(reader, &name, child_empty)?))
            }
            "Version" => template.set_version(Some(read_text(reader, &name, child_empty)?)),
            _ => skip(reader, &child, child_empty)?,
        }
    }
    Ok(template)
}

fn read_instance(reader: &mut XmlReader<'_>, empty: bool) -> Result<Instance> {
    let mut instance = Instance::new();
    if empty {
        return Ok(instance);
    }
    while let Some((child, child_empty)) = next_child(reader, "Instance")? {
        let name = local_name(&child);
        match name.as_str() {
            "InstanceId" => instance.set_instance_id(Some(read_text(reader, &name, child_empty)?)),
            "AvailabilityZone" => {
                instance.set_availability_zone(Some(read_text(reader, &name, child_empty)?))
            }
            "LifecycleState" => {
                instance.set_lifecycle_state(Some(read_text(reader, &name, child_empty)?))
            }
            "HealthStatus" => {
                instance.set_health_status(Some(read_text(reader, &name, child_empty)?))
            }
            "LaunchConfigurationName" => instance
                .set_launch_configuration_name(Some(read_text(reader, &name, child_empty)?)),
            "LaunchTemplate" => {
                instance.set_launch_template(Some(read_launch_template(reader, child_empty)?))
            }
            "ProtectedFromScaleIn" => {
                instance.set_protected_from_scale_in(Some(read_bool(reader, &name, child_empty)?))
            }
            _ => skip(reader, &child, child_empty)?,
        }
    }
    Ok(instance)
}

fn read_instance_list(reader: &mut XmlReader<'_>, empty: bool) -> Result<Vec<Instance>> {
    let mut instances = Vec::new();
    if empty {
        return Ok(instances);
    }
    while let Some((child, child_empty)) = next_child(reader, "Instances")? {
        if local_name(&child) == "member" {
            instances.push(read_instance(reader, child_empty)?);
        } else {
            skip(reader, &child, child_empty)?;
        }
    }
    Ok(instances)
}

fn read_group(reader: &mut XmlReader<'_>, empty: bool) -> Result<GroupInstances> {
    let mut group = GroupInstances::default();
    if empty {
        return Ok(group);
    }
    while let Some((child, child_empty)) = next_child(reader, "AutoScalingGroup")? {
        let name = local_name(&child);
        match name.as_str() {
            "AutoScalingGroupName" => {
                group.group_name = Some(read_text(reader, &name, child_empty)?)
            }
            "Instances" => group.instances = read_instance_list(reader, child_empty)?,
            _ => skip(reader, &child, child_empty)?,
        }
    }
    log::debug!(
        "Read group {} with {} instances",
        group.group_name.as_deref().unwrap_or("<unnamed>"),
        group.instances.len()
    );
    Ok(group)
}

fn read_groups(reader: &mut XmlReader<'_>, empty: bool) -> Result<Vec<GroupInstances>> {
    let mut groups = Vec::new();
    if empty {
        return Ok(groups);
    }
    while let Some((child, child_empty)) = next_child(reader, "AutoScalingGroups")? {
        if local_name(&child) == "member" {
            groups.push(read_group(reader, child_empty)?);
        } else {
            skip(reader, &child, child_empty)?;
        }
    }
    Ok(groups)
}

fn read_service_error(reader: &mut XmlReader<'_>, empty: bool) -> Result<Error> {
    let mut code = String::new();
    let mut message = String::new();
    if !empty {
        while let Some((child, child_empty)) = next_child(reader, "Error")? {
            let name = local_name(&child);
            match name.as_str() {
                "Code" => code = read_text(reader, &name, child_empty)?,
                "Message" => message = read_text(reader, &name, child_empty)?,
                _ => skip(reader, &child, child_empty)?,
            }
        }
    }
    Ok(Error::Service { code, message })
}

/// Parse a single instance element
///
/// The root element name is not checked, so both `<Instance>` and a list
/// `<member>` work.
pub fn parse_instance(xml: &str) -> Result<Instance> {
    let mut reader = new_reader(xml);
    loop {
        match reader.read_event()? {
            Event::Start(_) => return read_instance(&mut reader, false),
            Event::Empty(_) => return read_instance(&mut reader, true),
            Event::Eof => return Err(Error::UnexpectedEof("Instance".to_string())),
            _ => {}
        }
    }
}

/// Parse a `DescribeAutoScalingGroupsResponse` document
///
/// Returns one entry per group, in document order. An `ErrorResponse`
/// document becomes [`Error::Service`].
pub fn parse_describe_groups(xml: &str) -> Result<Vec<GroupInstances>> {
    let mut reader = new_reader(xml);
    let mut groups = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) => match local_name(&e).as_str() {
                "AutoScalingGroups" => groups.extend(read_groups(&mut reader, false)?),
                "Error" => return Err(read_service_error(&mut reader, false)?),
                // Descend into wrapper elements
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    log::debug!("Parsed {} Auto Scaling groups from XML", groups.len());
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::LifecycleState;

    const DESCRIBE_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<DescribeAutoScalingGroupsResponse xmlns="https://autoscaling.amazonaws.com/doc/2011-01-01/">
  <DescribeAutoScalingGroupsResult>
    <AutoScalingGroups>
      <member>
        <AutoScalingGroupARN>arn:aws:autoscaling:us-east-1:123456789012:autoScalingGroup:uuid:autoScalingGroupName/web-asg</AutoScalingGroupARN>
        <AvailabilityZones>
          <member>us-east-1a</member>
          <member>us-east-1b</member>
        </AvailabilityZones>
        <Instances>
          <member>
            <HealthStatus>Healthy</HealthStatus>
            <AvailabilityZone>us-east-1a</AvailabilityZone>
            <InstanceId>i-0a1</InstanceId>
            <InstanceType>t3.micro</InstanceType>
            <LaunchTemplate>
              <LaunchTemplateName>web</LaunchTemplateName>
              <Version>$Latest</Version>
              <LaunchTemplateId>lt-1</LaunchTemplateId>
            </LaunchTemplate>
            <LifecycleState>InService</LifecycleState>
            <ProtectedFromScaleIn>false</ProtectedFromScaleIn>
          </member>
          <member>
            <HealthStatus>Unhealthy</HealthStatus>
            <AvailabilityZone>us-east-1b</AvailabilityZone>
            <InstanceId>i-0b2</InstanceId>
            <LaunchConfigurationName>web-lc</LaunchConfigurationName>
            <LifecycleState>Terminating:Wait</LifecycleState>
            <ProtectedFromScaleIn>true</ProtectedFromScaleIn>
          </member>
        </Instances>
        <Tags>
          <member>
            <Key>team</Key>
            <Value>web</Value>
          </member>
        </Tags>
        <AutoScalingGroupName>web-asg</AutoScalingGroupName>
      </member>
      <member>
        <AutoScalingGroupName>empty-asg</AutoScalingGroupName>
        <Instances/>
      </member>
    </AutoScalingGroups>
  </DescribeAutoScalingGroupsResult>
  <ResponseMetadata>
    <RequestId>7c6e177f-f082-11e1-ac58-3714bEXAMPLE</RequestId>
  </ResponseMetadata>
</DescribeAutoScalingGroupsResponse>"#;

    #[test]
    fn parse_single_instance() {
        let xml = r#"<Instance>
            <InstanceId>i-1234567890abcdef0</InstanceId>
            <AvailabilityZone>us-west-2c</AvailabilityZone>
            <LifecycleState>Pending:Wait</LifecycleState>
            <HealthStatus>Healthy</HealthStatus>
            <LaunchConfigurationName>my-lc</LaunchConfigurationName>
            <ProtectedFromScaleIn>true</ProtectedFromScaleIn>
        </Instance>"#;

        let instance = parse_instance(xml).unwrap();
        let expected = Instance::new()
            .with_instance_id("i-1234567890abcdef0")
            .with_availability_zone("us-west-2c")
            .with_lifecycle_state(LifecycleState::PendingWait)
            .with_health_status("Healthy")
            .with_launch_configuration_name("my-lc")
            .with_protected_from_scale_in(true);
        assert_eq!(instance, expected);
    }

    #[test]
    fn missing_elements_stay_unset() {
        let instance = parse_instance("<member><InstanceId>i-1</InstanceId></member>").unwrap();
        assert_eq!(instance, Instance::new().with_instance_id("i-1"));
    }

    #[test]
    fn self_closing_string_element_is_empty_string() {
        let instance = parse_instance("<Instance><HealthStatus/></Instance>").unwrap();
        assert_eq!(instance.health_status(), Some(""));
    }

    #[test]
    fn self_closing_root_is_empty_instance() {
        assert_eq!(parse_instance("<Instance/>").unwrap(), Instance::new());
    }

    #[test]
    fn escaped_text_is_unescaped() {
        let instance = parse_instance(
            "<Instance><LaunchConfigurationName>a&amp;b</LaunchConfigurationName></Instance>",
        )
        .unwrap();
        assert_eq!(instance.launch_configuration_name(), Some("a&b"));
    }

    #[test]
    fn surrounding_whitespace_is_preserved() {
        let instance = parse_instance(
            "<Instance>\n  <LaunchConfigurationName>  web lc  </LaunchConfigurationName>\n\
             <HealthStatus>   </HealthStatus>\n</Instance>",
        )
        .unwrap();
        assert_eq!(instance.launch_configuration_name(), Some("  web lc  "));
        assert_eq!(instance.health_status(), Some("   "));
    }

    #[test]
    fn whitespace_only_differs_from_empty_element() {
        let blank = parse_instance("<Instance><HealthStatus> </HealthStatus></Instance>").unwrap();
        let empty = parse_instance("<Instance><HealthStatus/></Instance>").unwrap();
        assert_ne!(blank, empty);
    }

    #[test]
    fn invalid_boolean_is_rejected() {
        let result =
            parse_instance("<Instance><ProtectedFromScaleIn>yes</ProtectedFromScaleIn></Instance>");
        match result {
            Err(Error::InvalidBoolean { element, value }) => {
                assert_eq!(element, "ProtectedFromScaleIn");
                assert_eq!(value, "yes");
            }
            other => panic!("expected InvalidBoolean, got {:?}", other),
        }
    }

    #[test]
    fn truncated_document_is_rejected() {
        assert!(parse_instance("<Instance><InstanceId>i-1</InstanceId>").is_err());
        assert!(parse_instance("").is_err());
    }

    #[test]
    fn unknown_lifecycle_label_is_kept_verbatim() {
        let instance =
            parse_instance("<Instance><LifecycleState>Warmed:Pending</LifecycleState></Instance>")
                .unwrap();
        assert_eq!(instance.lifecycle_state(), Some("Warmed:Pending"));
        assert!(instance.lifecycle_state_kind().is_err());
    }

    #[test]
    fn parse_describe_groups_response() {
        let groups = parse_describe_groups(DESCRIBE_RESPONSE).unwrap();
        assert_eq!(groups.len(), 2);

        let web = &groups[0];
        assert_eq!(web.group_name.as_deref(), Some("web-asg"));
        assert_eq!(web.instances.len(), 2);

        let first = &web.instances[0];
        assert_eq!(first.instance_id(), Some("i-0a1"));
        assert_eq!(first.protected_from_scale_in(), Some(false));
        assert_eq!(
            first.launch_template(),
            Some(
                &LaunchTemplateSpecification::new()
                    .with_launch_template_id("lt-1")
                    .with_launch_template_name("web")
                    .with_version("$Latest")
            )
        );

        let second = &web.instances[1];
        assert_eq!(second.lifecycle_state(), Some("Terminating:Wait"));
        assert_eq!(second.launch_configuration_name(), Some("web-lc"));
        assert_eq!(second.launch_template(), None);

        assert_eq!(groups[1].group_name.as_deref(), Some("empty-asg"));
        assert!(groups[1].instances.is_empty());
    }

    #[test]
    fn xml_and_json_agree() {
        let json = r#"{"AutoScalingGroups":[{"AutoScalingGroupName":"g","Instances":[
            {"InstanceId":"i-1","LifecycleState":"Standby","ProtectedFromScaleIn":true}]}]}"#;
        let xml = "<DescribeAutoScalingGroupsResponse><DescribeAutoScalingGroupsResult>\
            <AutoScalingGroups><member><AutoScalingGroupName>g</AutoScalingGroupName>\
            <Instances><member><InstanceId>i-1</InstanceId>\
            <LifecycleState>Standby</LifecycleState>\
            <ProtectedFromScaleIn>true</ProtectedFromScaleIn></member></Instances>\
            </member></AutoScalingGroups></DescribeAutoScalingGroupsResult>\
            </DescribeAutoScalingGroupsResponse>";
        assert_eq!(
            parse_describe_groups(xml).unwrap(),
            crate::group::parse_describe_groups_json(json).unwrap()
        );
    }

    #[test]
    fn response_without_groups_is_empty() {
        let xml = "<DescribeAutoScalingGroupsResponse><DescribeAutoScalingGroupsResult>\
            <AutoScalingGroups/></DescribeAutoScalingGroupsResult>\
            </DescribeAutoScalingGroupsResponse>";
        assert!(parse_describe_groups(xml).unwrap().is_empty());
    }

    #[test]
    fn error_response_becomes_service_error() {
        let xml = r#"<ErrorResponse xmlns="https://autoscaling.amazonaws.com/doc/2011-01-01/">
  <Error>
    <Type>Sender</Type>
    <Code>ValidationError</Code>
    <Message>1 validation error detected</Message>
  </Error>
  <RequestId>req-1</RequestId>
</ErrorResponse>"#;
        match parse_describe_groups(xml) {
            Err(Error::Service { code, message }) => {
                assert_eq!(code, "ValidationError");
                assert_eq!(message, "1 validation error detected");
            }
            other => panic!("expected service error, got {:?}", other),
        }
    }
}
